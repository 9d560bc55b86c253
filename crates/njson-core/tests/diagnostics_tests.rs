use njson_core::{parse_text, SyntaxError};

fn report(source: &str, label: &str) -> String {
    parse_text(source.as_bytes(), label).unwrap_err().to_string()
}

#[test]
fn report_shows_label_position_line_and_message() {
    assert_eq!(
        report(r#"{"a": @}"#, "cfg.json"),
        "file cfg.json : line 1 : offset 7\n   \
         {\"a\": @}\n   \
         \x20     ^\n\
         syntax error: invalid character '@'"
    );
}

#[test]
fn report_picks_the_failing_line() {
    let source = "{\n  \"first\": 1,\n  \"second\": [1,,2]\n}";
    let text = report(source, "multi.json");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "file multi.json : line 3 : offset 16");
    assert_eq!(lines[1], "     \"second\": [1,,2]");
    assert_eq!(lines[2], format!("   {}^", " ".repeat(15)));
    assert_eq!(lines[3], "syntax error: expect Element or ']'");
}

#[test]
fn report_for_multi_line_string() {
    let text = report("{\"a\": \"ab\ncd\"}", "<source>");
    assert!(text.starts_with("file <source> : line 1 : offset 10\n"));
    assert!(text.contains("   {\"a\": \"ab\n"));
    assert!(text.ends_with("syntax error: multi-line strings are not supported"));
}

#[test]
fn caret_follows_tabs() {
    let text = report("{\n\t\"a\": x}", "tabs.json");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "file tabs.json : line 2 : offset 7");
    assert_eq!(lines[2], "   \t     ^");
}

#[test]
fn crlf_is_not_echoed() {
    let err = parse_text(b"{\r\n  \"a\": ?\r\n}", "crlf.json").unwrap_err();
    let syntax = err.as_syntax().unwrap();
    assert_eq!(syntax.source_line(), Some("  \"a\": ?"));
    assert!(!err.to_string().contains('\r'));
}

#[test]
fn zero_line_number_falls_back() {
    let err = SyntaxError::new(b"{}", "x.json", 0, 1, "boom");
    assert_eq!(err.source_line(), None);
    assert_eq!(
        err.to_string(),
        "file x.json : (invalid line number)\nsyntax error: boom"
    );
}

#[test]
fn line_number_past_end_falls_back() {
    let err = SyntaxError::new(b"{\n}", "x.json", 5, 1, "boom");
    assert_eq!(
        err.to_string(),
        "file x.json : (invalid line number)\nsyntax error: boom"
    );
}

#[test]
fn accessors_expose_position() {
    let err = SyntaxError::new(b"line one\nline two", "src", 2, 6, "bad");
    assert_eq!(err.label(), "src");
    assert_eq!(err.line(), 2);
    assert_eq!(err.offset(), 6);
    assert_eq!(err.message(), "bad");
    assert_eq!(err.source_line(), Some("line two"));
}

#[test]
fn error_at_end_of_input_on_trailing_newline() {
    // EOF sits on the empty line after the final newline.
    let err = parse_text(b"{\"a\": 1\n", "eof.json").unwrap_err();
    let syntax = err.as_syntax().unwrap();
    assert_eq!((syntax.line(), syntax.offset()), (2, 1));
    assert_eq!(syntax.source_line(), Some(""));
}
