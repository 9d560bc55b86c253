use njson_core::{tokenize, SyntaxError, Token, TokenKind};

fn tokens(source: &str) -> Vec<Token> {
    tokenize(source.as_bytes(), "<test>")
        .unwrap()
        .iter()
        .cloned()
        .collect()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokens(source).iter().map(|t| t.kind).collect()
}

/// The single string token produced by `source`.
fn string_text(source: &str) -> String {
    let toks = tokens(source);
    assert_eq!(toks.len(), 2, "expected one token plus EOF for {source:?}");
    assert_eq!(toks[0].kind, TokenKind::String);
    toks[0].text.clone()
}

fn syntax_error(source: &str) -> SyntaxError {
    let err = tokenize(source.as_bytes(), "<test>").unwrap_err();
    err.as_syntax()
        .unwrap_or_else(|| panic!("expected a syntax error for {source:?}, got {err}"))
        .clone()
}

// ============================================================================
// Structure and positions
// ============================================================================

#[test]
fn structural_characters_are_single_tokens() {
    assert_eq!(
        kinds("{}[]:,"),
        vec![
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn empty_input_is_just_eof() {
    let toks = tokens("");
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, TokenKind::Eof);
    assert_eq!((toks[0].line, toks[0].offset), (1, 1));
}

#[test]
fn tokens_record_line_and_offset() {
    let toks = tokens("{\n  \"a\": 1\n}");
    let positions: Vec<(TokenKind, usize, usize)> =
        toks.iter().map(|t| (t.kind, t.line, t.offset)).collect();
    assert_eq!(
        positions,
        vec![
            (TokenKind::LeftBrace, 1, 1),
            (TokenKind::String, 2, 3),
            (TokenKind::Colon, 2, 6),
            (TokenKind::Integer, 2, 8),
            (TokenKind::RightBrace, 3, 1),
            (TokenKind::Eof, 3, 2),
        ]
    );
}

#[test]
fn tab_and_carriage_return_advance_offset() {
    let toks = tokens("\t\r{");
    assert_eq!(toks[0].kind, TokenKind::LeftBrace);
    assert_eq!(toks[0].offset, 3);
}

#[test]
fn crlf_line_endings_count_one_line() {
    let toks = tokens("{\r\n}");
    assert_eq!((toks[1].line, toks[1].offset), (2, 1));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn string_escapes_newline_and_tab() {
    assert_eq!(string_text(r#""a\n\tb""#), "a\n\tb");
}

#[test]
fn string_escapes_standard_set() {
    assert_eq!(
        string_text(r#""\"\\\/\b\f\r""#),
        "\"\\/\u{8}\u{c}\r"
    );
}

#[test]
fn unicode_escape_ascii() {
    assert_eq!(string_text(r#""\u0041""#), "A");
}

#[test]
fn unicode_escape_latin1_is_single_code_point() {
    let text = string_text(r#""\u00e9""#);
    assert_eq!(text, "\u{e9}");
    assert_eq!(text.chars().count(), 1);
    assert_eq!(string_text(r#""\u00E9""#), "\u{e9}");
}

#[test]
fn unicode_escape_cjk() {
    assert_eq!(string_text(r#""\u4f60\u597d""#), "\u{4f60}\u{597d}");
}

#[test]
fn raw_utf8_passes_through() {
    assert_eq!(string_text("\"caf\u{e9} \u{65e5}\u{672c}\""), "caf\u{e9} \u{65e5}\u{672c}");
}

#[test]
fn empty_string() {
    assert_eq!(string_text(r#""""#), "");
}

#[test]
fn string_token_offset_is_opening_quote() {
    let toks = tokens(r#"  "abc""#);
    assert_eq!(toks[0].offset, 3);
    assert_eq!(toks[1].offset, 8);
}

#[test]
fn raw_newline_in_string_is_rejected() {
    let err = syntax_error("\"ab\ncd\"");
    assert!(err.message().contains("multi-line strings"), "{}", err.message());
    assert_eq!((err.line(), err.offset()), (1, 4));
}

#[test]
fn unknown_escape_is_rejected() {
    let err = syntax_error(r#""\x""#);
    assert_eq!(err.message(), "invalid escape sequence '\\x'");
    assert_eq!(err.offset(), 2);
}

#[test]
fn backslash_at_end_of_input_is_rejected() {
    let err = syntax_error("\"ab\\");
    assert_eq!(err.message(), "incomplete escape sequence");
}

#[test]
fn short_unicode_escape_is_rejected() {
    let err = syntax_error(r#""\u12""#);
    assert!(err.message().contains("incomplete unicode escape"));
}

#[test]
fn non_hex_unicode_escape_is_rejected() {
    let err = syntax_error(r#""\u12G4""#);
    assert!(err.message().contains("incomplete unicode escape"));
}

#[test]
fn lone_surrogate_escape_is_rejected() {
    let err = syntax_error(r#""\uD800""#);
    assert_eq!(err.message(), "invalid unicode escape '\\ud800'");
}

#[test]
fn surrogate_pair_escape_is_one_code_point() {
    let text = string_text(r#""\ud83d\ude00""#);
    assert_eq!(text, "\u{1F600}");
    assert_eq!(text.chars().count(), 1);
    assert_eq!(string_text(r#""a\uD834\uDD1Eb""#), "a\u{1D11E}b");
}

#[test]
fn surrogate_pair_token_keeps_following_positions() {
    let toks = tokens(r#"["\ud83d\ude00", 1]"#);
    assert_eq!(toks[2].kind, TokenKind::Comma);
    assert_eq!(toks[2].offset, 16);
}

#[test]
fn lone_low_surrogate_escape_is_rejected() {
    let err = syntax_error(r#""\udc00""#);
    assert_eq!(err.message(), "invalid unicode escape '\\udc00'");
}

#[test]
fn high_surrogate_followed_by_non_low_escape_is_rejected() {
    let err = syntax_error(r#""\ud83d\u0041""#);
    assert_eq!(err.message(), "invalid unicode escape '\\ud83d'");
    assert_eq!(err.offset(), 2);

    let err = syntax_error(r#""\ud83d\ud83d""#);
    assert_eq!(err.message(), "invalid unicode escape '\\ud83d'");

    let err = syntax_error(r#""\ud83d\n""#);
    assert_eq!(err.message(), "invalid unicode escape '\\ud83d'");
}

#[test]
fn raw_control_bytes_are_kept() {
    assert_eq!(string_text("\"a\tb\""), "a\tb");
    assert_eq!(string_text("\"\u{0}\u{1}\u{1f}\""), "\u{0}\u{1}\u{1f}");
    assert_eq!(string_text("\"a\rb\""), "a\rb");
}

#[test]
fn unterminated_string_points_at_opening_quote() {
    let err = syntax_error("{\"abc");
    assert_eq!(err.message(), "unterminated string literal");
    assert_eq!((err.line(), err.offset()), (1, 2));
}

#[test]
fn invalid_utf8_in_string_is_rejected() {
    let err = tokenize(b"\"\xff\xfe\"", "<test>").unwrap_err();
    let syntax = err.as_syntax().unwrap();
    assert_eq!(syntax.message(), "invalid UTF-8 in string literal");
}

// ============================================================================
// Numbers and keywords
// ============================================================================

#[test]
fn integer_and_float_classification() {
    let toks = tokens("42 42.0 -3.5 -7 007");
    let classified: Vec<(TokenKind, &str)> = toks
        .iter()
        .take(5)
        .map(|t| (t.kind, t.text.as_str()))
        .collect();
    assert_eq!(
        classified,
        vec![
            (TokenKind::Integer, "42"),
            (TokenKind::Float, "42.0"),
            (TokenKind::Float, "-3.5"),
            (TokenKind::Integer, "-7"),
            (TokenKind::Integer, "007"),
        ]
    );
}

#[test]
fn lone_minus_is_an_integer_token() {
    // Rejected later by the parser, not the tokenizer.
    let toks = tokens("-");
    assert_eq!((toks[0].kind, toks[0].text.as_str()), (TokenKind::Integer, "-"));
}

#[test]
fn trailing_dot_is_a_float_token() {
    let toks = tokens("1.");
    assert_eq!((toks[0].kind, toks[0].text.as_str()), (TokenKind::Float, "1."));
}

#[test]
fn leading_dot_is_an_invalid_character() {
    let err = syntax_error(".5");
    assert_eq!(err.message(), "invalid character '.'");
    assert_eq!(err.offset(), 1);
}

#[test]
fn exponent_is_not_part_of_a_number() {
    let err = syntax_error("1e5");
    assert_eq!(err.message(), "invalid character 'e'");
    assert_eq!(err.offset(), 2);
}

#[test]
fn keywords() {
    let toks = tokens("true false null");
    let classified: Vec<(TokenKind, &str)> = toks
        .iter()
        .map(|t| (t.kind, t.text.as_str()))
        .collect();
    assert_eq!(
        classified,
        vec![
            (TokenKind::True, "true"),
            (TokenKind::False, "false"),
            (TokenKind::Null, "null"),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn misspelled_keyword_is_invalid() {
    let err = syntax_error("{\"a\": nul}");
    assert_eq!(err.message(), "invalid character 'n'");
    assert_eq!(err.offset(), 7);
}

#[test]
fn unknown_character_reports_position() {
    let err = syntax_error("{\n  @\n}");
    assert_eq!(err.message(), "invalid character '@'");
    assert_eq!((err.line(), err.offset()), (2, 3));
}

#[test]
fn non_ascii_outside_string_is_invalid() {
    let err = syntax_error("\u{e9}");
    assert_eq!(err.message(), "invalid character '\u{e9}'");
}

// ============================================================================
// Stream rendering
// ============================================================================

#[test]
fn token_stream_display() {
    let stream = tokenize(b"{}", "<test>").unwrap();
    assert_eq!(
        stream.to_string(),
        "< Token '{' kind = '{' line = 1 offset = 1 >\n\
         < Token '}' kind = '}' line = 1 offset = 2 >\n\
         < Token '' kind = end of input line = 1 offset = 3 >"
    );
}

#[test]
fn token_stream_random_access() {
    let stream = tokenize(br#"{"k": [1]}"#, "<test>").unwrap();
    assert_eq!(stream.len(), 8);
    assert_eq!(stream.at(3).map(|t| t.kind), Some(TokenKind::LeftBracket));
    assert!(stream.at(8).is_none());
    assert_eq!(stream.as_slice().last().map(|t| t.kind), Some(TokenKind::Eof));
}
