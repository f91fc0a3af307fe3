//! Lagoon Eval - tree-walking interpreter for the Lagoon scripting language.
//!
//! # Architecture
//!
//! - [`Interpreter`]: host entry point; seeds the builtin namespace and
//!   runs programs or single expressions
//! - [`Evaluator`]: walks one syntax tree against a [`ScopeChain`]
//! - [`Value`]: runtime values; containers are shared handles
//! - [`Table`](value::Table): the language's objects, with metatable
//!   delegation and `parent` back-links
//! - [`errors`]: [`EvalError`] and its `#[cold]` constructors
//!
//! Control flow (`continue`, `break N`, `return`) travels as
//! [`Outcome`](signal::Outcome) values; only failures use `Err`.

mod builtins;
pub mod environment;
pub mod errors;
pub mod interpreter;
mod methods;
pub mod operators;
pub mod print_handler;
pub mod signal;
pub mod value;

use std::path::PathBuf;

use thiserror::Error;

pub use environment::{Namespace, ScopeChain};
pub use errors::{EvalError, EvalResult, ExceptionKind};
pub use interpreter::{Evaluator, Interpreter, InterpreterBuilder, Runtime};
pub use lagoon_parse::ParseError;
pub use print_handler::{buffer_handler, silent_handler, stdout_handler, SharedPrintHandler};
pub use value::Value;

/// Failure of a host-level run.
#[derive(Debug, Error)]
pub enum LagoonError {
    /// The source did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The program failed while running.
    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LagoonError {
    /// Exception kind of an evaluation failure.
    pub fn kind(&self) -> Option<ExceptionKind> {
        match self {
            LagoonError::Eval(err) => err.kind(),
            LagoonError::Parse(_) | LagoonError::Io { .. } => None,
        }
    }
}
