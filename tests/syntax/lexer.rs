//! Integration tests for the lexer
//!
//! Tests tokenization of JavaScript source.

use arbor_syntax::{Keyword, Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

// =============================================================================
// Tokens
// =============================================================================

#[test]
fn statement_tokens() {
    assert_eq!(
        kinds("var x = 1;"),
        vec![
            TokenKind::Keyword(Keyword::Var),
            TokenKind::Identifier("x".into()),
            TokenKind::Punct("="),
            TokenKind::Number(1.0),
            TokenKind::Punct(";"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn longest_punctuator_wins() {
    assert_eq!(
        kinds("a >>>= b !== c"),
        vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Punct(">>>="),
            TokenKind::Identifier("b".into()),
            TokenKind::Punct("!=="),
            TokenKind::Identifier("c".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn numbers() {
    assert_eq!(kinds("0x1F")[0], TokenKind::Number(31.0));
    assert_eq!(kinds(".25")[0], TokenKind::Number(0.25));
    assert_eq!(kinds("1e3")[0], TokenKind::Number(1000.0));
    assert_eq!(kinds("2.5E-1")[0], TokenKind::Number(0.25));
    assert!(matches!(kinds("3in")[0], TokenKind::Error(_)));
}

#[test]
fn string_escapes() {
    assert_eq!(
        kinds(r#""a\tb\x41B\"""#)[0],
        TokenKind::String("a\tbAB\"".into())
    );
    assert_eq!(kinds("'it\\'s'")[0], TokenKind::String("it's".into()));
    assert_eq!(kinds("'a\\\nb'")[0], TokenKind::String("ab".into()));
}

#[test]
fn comments_are_trivia() {
    let tokens = kinds("a // line\n/* block */ b");
    assert!(matches!(tokens[1], TokenKind::Comment(_)));
    assert!(tokens[1].is_trivia());
    assert!(matches!(tokens[2], TokenKind::Comment(_)));
}

// =============================================================================
// Line breaks and positions
// =============================================================================

#[test]
fn newline_before_is_recorded() {
    let tokens = Lexer::tokenize_all("a\nb c");
    assert!(!tokens[0].newline_before);
    assert!(tokens[1].newline_before);
    assert!(!tokens[2].newline_before);
}

#[test]
fn newline_inside_block_comment_counts() {
    let tokens: Vec<_> = Lexer::tokenize_all("a /*\n*/ b")
        .into_iter()
        .filter(|token| !token.kind.is_trivia())
        .collect();
    assert!(tokens[1].newline_before);
}

#[test]
fn spans_track_lines_and_columns() {
    let source = "x\n  yy";
    let tokens = Lexer::tokenize_all(source);
    assert_eq!(tokens[1].span.line, 2);
    assert_eq!(tokens[1].span.column, 3);
    assert_eq!(tokens[1].text(source), "yy");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unterminated_literals_are_errors() {
    assert!(matches!(kinds("'abc")[0], TokenKind::Error(_)));
    assert!(matches!(kinds("/* open")[0], TokenKind::Error(_)));
    assert!(matches!(kinds("\"a\\x4\"")[0], TokenKind::Error(_)));
}

#[test]
fn unknown_characters_do_not_stop_the_lexer() {
    let tokens = kinds("a # b");
    assert!(matches!(tokens[1], TokenKind::Error(_)));
    assert_eq!(tokens[2], TokenKind::Identifier("b".into()));
    assert_eq!(tokens.last(), Some(&TokenKind::Eof));
}
