//! Parse error types.

use lagoon_ir::Span;
use lagoon_lexer::LexError;
use thiserror::Error;

/// What was being parsed when an error occurred, for
/// "while parsing X" messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorContext {
    Statement,
    Expression,
    Block,
    CallArgs,
    Collection,
    Table,
    Callable,
    AssignTarget,
}

impl ErrorContext {
    pub const fn description(self) -> &'static str {
        match self {
            Self::Statement => "a statement",
            Self::Expression => "an expression",
            Self::Block => "a block",
            Self::CallArgs => "call arguments",
            Self::Collection => "a collection literal",
            Self::Table => "a table literal",
            Self::Callable => "a function literal",
            Self::AssignTarget => "an assignment target",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
            context: None,
        }
    }

    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    /// Message including the innermost parsing context.
    pub fn full_message(&self) -> String {
        match self.context {
            Some(ctx) => format!("{} (while parsing {})", self.message, ctx.description()),
            None => self.message.clone(),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.to_string(), err.span())
    }
}
