#![allow(clippy::unwrap_used, clippy::expect_used)]

use lagoon_ir::StringMacros;
use lagoon_lexer::{lex, LexError, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().kinds().cloned().collect()
}

#[test]
fn lexes_assignment_statement() {
    assert_eq!(
        kinds("a, b = 1, 2.5"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::Comma,
            TokenKind::Ident("b".into()),
            TokenKind::Eq,
            TokenKind::Int(1),
            TokenKind::Comma,
            TokenKind::Float(2.5),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn ranges_are_not_floats() {
    assert_eq!(
        kinds("0..5 0...5"),
        vec![
            TokenKind::Int(0),
            TokenKind::DotDot,
            TokenKind::Int(5),
            TokenKind::Int(0),
            TokenKind::DotDotDot,
            TokenKind::Int(5),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_and_continuations_are_dropped() {
    assert_eq!(
        kinds("x # note\ny \\\n z"),
        vec![
            TokenKind::Ident("x".into()),
            TokenKind::Newline,
            TokenKind::Ident("y".into()),
            TokenKind::Ident("z".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("isa island is in inside"),
        vec![
            TokenKind::Isa,
            TokenKind::Ident("island".into()),
            TokenKind::Is,
            TokenKind::In,
            TokenKind::Ident("inside".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn collection_delimiters() {
    assert_eq!(
        kinds("{| (| {: [: :] :} |) |}"),
        vec![
            TokenKind::LBracePipe,
            TokenKind::LParenPipe,
            TokenKind::LBraceColon,
            TokenKind::LBracketColon,
            TokenKind::ColonRBracket,
            TokenKind::ColonRBrace,
            TokenKind::PipeRParen,
            TokenKind::PipeRBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn sigils_and_numbered_args() {
    assert_eq!(
        kinds("$x @^y %0"),
        vec![
            TokenKind::Dollar,
            TokenKind::Ident("x".into()),
            TokenKind::At,
            TokenKind::Caret,
            TokenKind::Ident("y".into()),
            TokenKind::Percent,
            TokenKind::Int(0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn string_macro_suffix() {
    let tokens = lex(r##""#{1+2}"i"##).unwrap();
    let TokenKind::Str(lit) = &tokens.get(0).unwrap().kind else {
        panic!("expected string token");
    };
    assert_eq!(lit.text, "#{1+2}");
    assert_eq!(lit.macros, StringMacros::INTERPOLATE);
}

#[test]
fn keyword_after_string_is_not_a_suffix() {
    assert_eq!(kinds(r#""a"in x"#)[1], TokenKind::In);
}

#[test]
fn pattern_suffix() {
    let tokens = lex(r#"'\d+'~"#).unwrap();
    let TokenKind::Str(lit) = &tokens.get(0).unwrap().kind else {
        panic!("expected string token");
    };
    assert_eq!(lit.text, r"\d+");
    assert_eq!(lit.macros, StringMacros::PATTERN);
}

#[test]
fn heredoc_spans_lines() {
    let tokens = lex("x = \"\"\"\n  a\n  b\n\"\"\"a\ny").unwrap();
    let TokenKind::Str(lit) = &tokens.get(2).unwrap().kind else {
        panic!("expected string token");
    };
    assert_eq!(lit.text, "\n  a\n  b\n");
    assert_eq!(tokens.get(3).unwrap().kind, TokenKind::Newline);
}

#[test]
fn unterminated_string_is_an_error() {
    assert!(matches!(
        lex("x = 'abc"),
        Err(LexError::UnterminatedString { .. })
    ));
    assert!(matches!(
        lex("x = \"abc\ny\""),
        Err(LexError::UnterminatedString { .. })
    ));
}

#[test]
fn unexpected_character_is_an_error() {
    let err = lex("x = 1 ? 2").unwrap_err();
    assert_eq!(err.to_string(), "unexpected character `?`");
    assert_eq!(err.span().start, 6);
}

#[test]
fn integer_overflow_is_an_error() {
    assert!(matches!(
        lex("99999999999999999999"),
        Err(LexError::IntOverflow { .. })
    ));
}

proptest! {
    #[test]
    fn identifiers_roundtrip(name in "[a-z_][a-z0-9_]{0,12}") {
        let tokens = lex(&name).unwrap();
        let first = &tokens.get(0).unwrap().kind;
        let is_word = matches!(first, TokenKind::Ident(_)) || first.symbol() == name.as_str();
        prop_assert!(is_word);
        prop_assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn integers_roundtrip(n in 0i64..i64::MAX) {
        let tokens = lex(&n.to_string()).unwrap();
        prop_assert_eq!(&tokens.get(0).unwrap().kind, &TokenKind::Int(n));
    }
}
