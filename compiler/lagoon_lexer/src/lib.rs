//! Lexer for Lagoon using logos.
//!
//! [`lex`] turns source text into a [`TokenList`]. Comments and line
//! continuations are dropped; newlines are kept because they separate
//! statements. String literals come out cooked: escapes resolved, quotes
//! removed and macro suffix letters decoded into [`lagoon_ir::StringMacros`].

mod escape;
mod lex_error;
mod raw_token;
mod strings;
mod token;

use lagoon_ir::Span;
use logos::Logos;

pub use lex_error::LexError;
pub use token::{Token, TokenKind, TokenList};

use raw_token::RawToken;

/// Lex source code into a `TokenList`, stopping at the first error.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let slice = logos.slice();

        match token_result {
            Ok(RawToken::LineComment | RawToken::LineContinuation) => {}
            Ok(raw) => {
                let kind = convert_token(raw, slice, span)?;
                result.push(Token::new(kind, span));
            }
            Err(()) => {
                return Err(if slice.starts_with(['\'', '"']) {
                    LexError::UnterminatedString { span }
                } else {
                    LexError::UnexpectedChar {
                        text: slice.to_owned(),
                        span,
                    }
                });
            }
        }
    }

    let eof = u32::try_from(source.len()).unwrap_or(u32::MAX);
    result.push(Token::new(TokenKind::Eof, Span::new(eof, eof)));
    Ok(result)
}

fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    Ok(match raw {
        RawToken::Int => TokenKind::Int(slice.parse().map_err(|_| LexError::IntOverflow {
            text: slice.to_owned(),
            span,
        })?),
        RawToken::Float => TokenKind::Float(slice.parse().unwrap_or(f64::NAN)),
        RawToken::SqString | RawToken::DqString | RawToken::SqHeredoc | RawToken::DqHeredoc => {
            TokenKind::Str(strings::cook_string(raw, slice, span))
        }
        RawToken::Ident => TokenKind::Ident(slice.into()),

        RawToken::Newline => TokenKind::Newline,

        RawToken::If => TokenKind::If,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Times => TokenKind::Times,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Break => TokenKind::Break,
        RawToken::Return => TokenKind::Return,
        RawToken::Try => TokenKind::Try,
        RawToken::Except => TokenKind::Except,
        RawToken::As => TokenKind::As,
        RawToken::Raise => TokenKind::Raise,
        RawToken::Assert => TokenKind::Assert,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::Is => TokenKind::Is,
        RawToken::Isa => TokenKind::Isa,
        RawToken::Fn => TokenKind::Fn,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracePipe => TokenKind::LBracePipe,
        RawToken::PipeRBrace => TokenKind::PipeRBrace,
        RawToken::LParenPipe => TokenKind::LParenPipe,
        RawToken::PipeRParen => TokenKind::PipeRParen,
        RawToken::LBraceColon => TokenKind::LBraceColon,
        RawToken::ColonRBrace => TokenKind::ColonRBrace,
        RawToken::LBracketColon => TokenKind::LBracketColon,
        RawToken::ColonRBracket => TokenKind::ColonRBracket,

        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::DotDotDot => TokenKind::DotDotDot,

        RawToken::Eq => TokenKind::Eq,
        RawToken::ColonEq => TokenKind::ColonEq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,

        RawToken::Dollar => TokenKind::Dollar,
        RawToken::At => TokenKind::At,
        RawToken::Caret => TokenKind::Caret,

        RawToken::LineComment | RawToken::LineContinuation => TokenKind::Newline,
    })
}
