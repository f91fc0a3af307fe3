//! Program roots.
//!
//! A program run lets language errors (NameError, TypeError, OtherError,
//! InterpreterError) through untouched. Any other failure, raised values
//! included, is wrapped as an InterpreterError carrying the 1-based line
//! and column of the last node whose evaluation started.

use std::rc::Rc;

use lagoon_ir::{Block, SourceText};
use lagoon_parse::ParseError;
use tracing::debug;

use super::Evaluator;
use crate::environment::ScopeChain;
use crate::errors::{self, EvalError, EvalResult};
use crate::value::CodeUnit;

impl Evaluator<'_> {
    /// Runs a program body, wrapping non-language failures with the
    /// position of the failing node.
    pub fn run_program(&mut self, body: &Block) -> Result<(), EvalError> {
        debug!(
            source = %self.unit.source.name(),
            statements = body.stmts.len(),
            "run program"
        );
        match self.exec_block(body) {
            Ok(_) => Ok(()),
            Err(err) if err.is_language_error() => Err(err),
            Err(err) => {
                let (line, column) = self.rt.last_position();
                debug!(line, column, error = %err, "program failed");
                Err(EvalError::Positioned {
                    line,
                    column,
                    source: Box::new(err),
                })
            }
        }
    }

    /// Parses `text` as a program and runs it in `chain`.
    ///
    /// Parse failures surface as OtherError.
    pub fn exec_text(&self, text: SourceText, chain: ScopeChain) -> Result<(), EvalError> {
        let program = lagoon_parse::parse_program(text.text())
            .map_err(|err| syntax_error(&text, &err))?;
        let unit = Rc::new(CodeUnit {
            source: Rc::new(text),
            arena: program.arena,
        });
        self.for_unit(unit, chain).run_program(&program.body)
    }

    /// Parses `text` as one expression and evaluates it in `chain`,
    /// without position wrapping.
    pub fn eval_text(&self, text: SourceText, chain: ScopeChain) -> EvalResult {
        let parsed = lagoon_parse::parse_expression(text.text())
            .map_err(|err| syntax_error(&text, &err))?;
        let unit = Rc::new(CodeUnit {
            source: Rc::new(text),
            arena: parsed.arena,
        });
        self.for_unit(unit, chain).eval_expr(parsed.root)
    }
}

fn syntax_error(text: &SourceText, err: &ParseError) -> EvalError {
    let (line, column) = text.line_col(err.span);
    errors::syntax_error(&text.name(), line, column, &err.full_message())
}
