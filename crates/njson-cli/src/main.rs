//! `njson` CLI: check, render and query JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Validate a document (prints "ok" or a positioned syntax error)
//! njson check -i config.json
//!
//! # Render the parsed tree in the compact single-quoted form
//! echo '{"name": "njson", "tags": ["a", "b"]}' | njson render
//!
//! # Look up a dotted path
//! njson get server.port -i config.json
//! njson get server.host --raw -i config.json
//!
//! # Dump the token stream
//! njson tokens -i config.json
//!
//! # List keys in source order (duplicates included)
//! njson keys server -i config.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use njson_core::options::DEFAULT_MAX_DEPTH;
use njson_core::{Document, ParseOptions, Value};
use std::io::{self, Read};
use tracing::{debug, Level};

const STDIN_LABEL: &str = "<stdin>";

#[derive(Parser)]
#[command(
    name = "njson",
    version,
    about = "Check, render and query JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Maximum nesting depth of arrays and objects
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the input and report the first syntax error, if any
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the parsed document in compact form
    Render {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the value at a dotted path such as `server.port`
    Get {
        /// Dotted path from the root object
        path: String,
        /// Print string values without quotes
        #[arg(long)]
        raw: bool,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the token stream, one token per line
    Tokens {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List object keys in source order, duplicates included
    Keys {
        /// Dotted path of an object (the root if omitted)
        path: Option<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ParseOptions::new().with_max_depth(cli.max_depth);
    debug!(max_depth = options.max_depth, "parse options");

    match cli.command {
        Commands::Check { input } => {
            let (source, label) = read_input(input.as_deref())?;
            parse(&source, &label, &options)?;
            println!("ok");
        }
        Commands::Render { input, output } => {
            let (source, label) = read_input(input.as_deref())?;
            let doc = parse(&source, &label, &options)?;
            write_output(output.as_deref(), &format!("{}\n", doc.render()))?;
        }
        Commands::Get { path, raw, input } => {
            let (source, label) = read_input(input.as_deref())?;
            let doc = parse(&source, &label, &options)?;
            let value = doc
                .lookup(&path)
                .with_context(|| format!("Failed to look up '{}' in {}", path, label))?;
            match value {
                Value::String(s) if raw => println!("{}", s),
                other => println!("{}", other),
            }
        }
        Commands::Tokens { input, output } => {
            let (source, label) = read_input(input.as_deref())?;
            let tokens = njson_core::tokenize(&source, &label)
                .with_context(|| format!("Failed to tokenize {}", label))?;
            write_output(output.as_deref(), &format!("{}\n", tokens))?;
        }
        Commands::Keys { path, input } => {
            let (source, label) = read_input(input.as_deref())?;
            let doc = parse(&source, &label, &options)?;
            let object = match path.as_deref() {
                None => doc.root(),
                Some(path) => {
                    let value = doc
                        .lookup(path)
                        .with_context(|| format!("Failed to look up '{}' in {}", path, label))?;
                    match value.as_object() {
                        Some(object) => object,
                        None => bail!("'{}' is {}, expected object", path, value.kind()),
                    }
                }
            };
            for key in object.keys() {
                println!("{}", key);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn parse(source: &[u8], label: &str, options: &ParseOptions) -> Result<Document> {
    njson_core::parse_text_with(source, label, options)
        .with_context(|| format!("Failed to parse {}", label))
}

/// Read the whole input and return it with the label used in diagnostics.
fn read_input(path: Option<&str>) -> Result<(Vec<u8>, String)> {
    match path {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("Failed to read file: {}", path))?;
            Ok((bytes, path.to_string()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok((buf, STDIN_LABEL.to_string()))
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
