//! Cooked tokens.

use std::fmt;

use lagoon_ir::{Ident, Span, StrLit};

/// A token with its span in the source.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Float(f64),
    Str(StrLit),
    Ident(Ident),

    // Keywords
    If,
    Elif,
    Else,
    While,
    For,
    In,
    Times,
    Continue,
    Break,
    Return,
    Try,
    Except,
    As,
    Raise,
    Assert,
    And,
    Or,
    Not,
    Is,
    Isa,
    Fn,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    /// `{|`
    LBracePipe,
    /// `|}`
    PipeRBrace,
    /// `(|`
    LParenPipe,
    /// `|)`
    PipeRParen,
    /// `{:`
    LBraceColon,
    /// `:}`
    ColonRBrace,
    /// `[:`
    LBracketColon,
    /// `:]`
    ColonRBracket,

    // Punctuation
    Comma,
    Semicolon,
    Colon,
    Dot,
    DotDot,
    DotDotDot,

    // Operators
    Eq,
    ColonEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,

    // Sigils
    Dollar,
    At,
    Caret,

    Newline,
    Eof,
}

impl TokenKind {
    /// Short human description for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(f) => format!("float `{f}`"),
            TokenKind::Str(_) => "string literal".to_owned(),
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Newline => "newline".to_owned(),
            TokenKind::Eof => "end of input".to_owned(),
            other => format!("`{}`", other.symbol()),
        }
    }

    /// Source text of fixed tokens.
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Times => "times",
            TokenKind::Continue => "continue",
            TokenKind::Break => "break",
            TokenKind::Return => "return",
            TokenKind::Try => "try",
            TokenKind::Except => "except",
            TokenKind::As => "as",
            TokenKind::Raise => "raise",
            TokenKind::Assert => "assert",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Is => "is",
            TokenKind::Isa => "isa",
            TokenKind::Fn => "fn",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracePipe => "{|",
            TokenKind::PipeRBrace => "|}",
            TokenKind::LParenPipe => "(|",
            TokenKind::PipeRParen => "|)",
            TokenKind::LBraceColon => "{:",
            TokenKind::ColonRBrace => ":}",
            TokenKind::LBracketColon => "[:",
            TokenKind::ColonRBracket => ":]",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::DotDotDot => "...",
            TokenKind::Eq => "=",
            TokenKind::ColonEq => ":=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Dollar => "$",
            TokenKind::At => "@",
            TokenKind::Caret => "^",
            TokenKind::Newline => "\\n",
            TokenKind::Eof => "<eof>",
            TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::Str(_) | TokenKind::Ident(_) => {
                "<literal>"
            }
        }
    }
}

/// Lexer output: tokens in source order, always ending with [`TokenKind::Eof`].
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn kinds(&self) -> impl Iterator<Item = &TokenKind> {
        self.tokens.iter().map(|t| &t.kind)
    }

    /// Move every span right by `base` bytes.
    ///
    /// Used when a fragment of a larger text is lexed on its own.
    pub fn shift(&mut self, base: u32) {
        for token in &mut self.tokens {
            token.span = token.span.offset_by(base);
            if let TokenKind::Str(lit) = &mut token.kind {
                lit.content_start = lit.content_start.saturating_add(base);
            }
        }
    }
}
