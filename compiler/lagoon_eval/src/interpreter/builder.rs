//! `InterpreterBuilder` for creating configured interpreters.

use std::path::PathBuf;

use super::{Interpreter, Runtime, DEFAULT_MAX_CALL_DEPTH};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Defaults: output to stdout, no originating file, a call depth limit of
/// [`DEFAULT_MAX_CALL_DEPTH`].
#[derive(Default)]
pub struct InterpreterBuilder {
    file_path: Option<PathBuf>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path reported as `__lagoonfile__`; `load` resolves relative to it.
    #[must_use]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Destination of `print`.
    ///
    /// Use `buffer_handler()` to capture output in tests.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            rt: Runtime::new(
                self.print_handler.unwrap_or_else(stdout_handler),
                self.file_path,
                self.max_call_depth.unwrap_or(DEFAULT_MAX_CALL_DEPTH),
            ),
        }
    }
}
