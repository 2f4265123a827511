use crate::parser::lexer::{lex, token_text};

/// Format tokens without trivia (default for most tests)
fn snapshot(input: &str) -> String {
    format_tokens(input, false)
}

/// Format tokens with trivia included
fn snapshot_raw(input: &str) -> String {
    format_tokens(input, true)
}

fn format_tokens(input: &str, include_trivia: bool) -> String {
    let tokens = lex(input);
    let mut out = String::new();
    for token in tokens {
        if include_trivia || !token.kind.is_trivia() {
            out.push_str(&format!(
                "{:?} {:?}\n",
                token.kind,
                token_text(input, &token)
            ));
        }
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("( ) [ ] : ! _ . @ # / * + ?"), @r##"
    ParenOpen "("
    ParenClose ")"
    BracketOpen "["
    BracketClose "]"
    Colon ":"
    Bang "!"
    Underscore "_"
    Dot "."
    At "@"
    Sharp "#"
    Slash "/"
    Star "*"
    Plus "+"
    Question "?"
    "##);
}

#[test]
fn identifiers() {
    insta::assert_snapshot!(snapshot("identifier _expression function.call not-eq x1"), @r##"
    Id "identifier"
    Id "_expression"
    Id "function.call"
    Id "not-eq"
    Id "x1"
    "##);
}

#[test]
fn lone_underscore_is_wildcard() {
    insta::assert_snapshot!(snapshot("(_) _x"), @r##"
    ParenOpen "("
    Underscore "_"
    ParenClose ")"
    Id "_x"
    "##);
}

#[test]
fn predicate_tokens() {
    insta::assert_snapshot!(snapshot("(#eq? @a \"b\")"), @r##"
    ParenOpen "("
    Sharp "#"
    Id "eq"
    Question "?"
    At "@"
    Id "a"
    DoubleQuote "\""
    StrVal "b"
    DoubleQuote "\""
    ParenClose ")"
    "##);
}

#[test]
fn string_with_escapes() {
    insta::assert_snapshot!(snapshot(r#""a\"b""#), @r##"
    DoubleQuote "\""
    StrVal "a\\\"b"
    DoubleQuote "\""
    "##);
}

#[test]
fn empty_string() {
    insta::assert_snapshot!(snapshot(r#""""#), @r##"
    DoubleQuote "\""
    DoubleQuote "\""
    "##);
}

#[test]
fn unterminated_string_stops_at_newline() {
    insta::assert_snapshot!(snapshot_raw("\"abc\n(x)"), @r##"
    DoubleQuote "\""
    StrVal "abc"
    Newline "\n"
    ParenOpen "("
    Id "x"
    ParenClose ")"
    "##);
}

#[test]
fn unterminated_string_with_trailing_escape() {
    insta::assert_snapshot!(snapshot(r#""abc\""#), @r##"
    DoubleQuote "\""
    StrVal "abc\\\""
    "##);
}

#[test]
fn lone_quote() {
    insta::assert_snapshot!(snapshot("\""), @r##"
    DoubleQuote "\""
    "##);
}

#[test]
fn garbage_is_coalesced() {
    insta::assert_snapshot!(snapshot("(a) $%^ (b)"), @r##"
    ParenOpen "("
    Id "a"
    ParenClose ")"
    Garbage "$%^"
    ParenOpen "("
    Id "b"
    ParenClose ")"
    "##);
}

#[test]
fn comments_are_trivia() {
    insta::assert_snapshot!(snapshot_raw("; note\n(a)"), @r##"
    Comment "; note"
    Newline "\n"
    ParenOpen "("
    Id "a"
    ParenClose ")"
    "##);
}

#[test]
fn token_spans_are_byte_offsets() {
    let tokens = lex("(é)");
    let close = tokens[2];
    assert_eq!(u32::from(close.span.start()), 3);
    assert_eq!(u32::from(close.span.end()), 4);
}
