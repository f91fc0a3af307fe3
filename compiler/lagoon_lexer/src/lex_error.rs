//! Lexer errors.

use lagoon_ir::Span;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("integer literal `{text}` does not fit in 64 bits")]
    IntOverflow { text: String, span: Span },

    #[error("unexpected character `{text}`")]
    UnexpectedChar { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::IntOverflow { span, .. }
            | LexError::UnexpectedChar { span, .. } => *span,
        }
    }
}
