//! Raw token definition.
//!
//! `RawToken` is the logos-derived tokenizer output before literal payloads
//! are cooked into [`TokenKind`](crate::TokenKind)s.

use logos::{Lexer, Logos};

use crate::strings::{scan_heredoc, scan_quoted};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    #[regex(r"\\[ \t]*\n")]
    LineContinuation,

    // Keywords
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("times")]
    Times,
    #[token("continue")]
    Continue,
    #[token("break")]
    Break,
    #[token("return")]
    Return,
    #[token("try")]
    Try,
    #[token("except")]
    Except,
    #[token("as")]
    As,
    #[token("raise")]
    Raise,
    #[token("assert")]
    Assert,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("is")]
    Is,
    #[token("isa")]
    Isa,
    #[token("fn")]
    Fn,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("{|")]
    LBracePipe,
    #[token("|}")]
    PipeRBrace,
    #[token("(|")]
    LParenPipe,
    #[token("|)")]
    PipeRParen,
    #[token("{:")]
    LBraceColon,
    #[token(":}")]
    ColonRBrace,
    #[token("[:")]
    LBracketColon,
    #[token(":]")]
    ColonRBracket,

    // Punctuation
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("...")]
    DotDotDot,

    // Operators
    #[token("=")]
    Eq,
    #[token(":=")]
    ColonEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Sigils
    #[token("$")]
    Dollar,
    #[token("@")]
    At,
    #[token("^")]
    Caret,

    // Literals
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[regex(r"[0-9]+")]
    Int,

    #[token("'", |lex| scan_quoted(lex, '\''))]
    SqString,
    #[token("\"", |lex| scan_quoted(lex, '"'))]
    DqString,
    #[token("'''", |lex| scan_heredoc(lex, "'''"))]
    SqHeredoc,
    #[token("\"\"\"", |lex| scan_heredoc(lex, "\"\"\""))]
    DqHeredoc,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Advance past a macro suffix written right after a closing quote.
///
/// The suffix is the maximal run of identifier characters and `~`; it is
/// only consumed when every character in it is a macro letter.
pub(crate) fn bump_macro_suffix(lex: &mut Lexer<'_, RawToken>) {
    let run = lex
        .remainder()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '~')
        .map(char::len_utf8)
        .sum::<usize>();
    if run > 0 && lex.remainder()[..run].chars().all(crate::strings::is_macro_letter) {
        lex.bump(run);
    }
}
