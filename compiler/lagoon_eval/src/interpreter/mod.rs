//! Tree-walking evaluator for Lagoon.
//!
//! # Architecture
//!
//! An [`Interpreter`] owns a [`Runtime`]: configuration plus the little
//! state shared by every frame of a run (call depth, the failures being
//! handled by `except` blocks, and the last node whose evaluation
//! started). Evaluation itself happens on an [`Evaluator`], a cheap
//! context made of the runtime, the [`CodeUnit`] whose syntax tree is being
//! walked and the current [`ScopeChain`].
//!
//! Calling a closure creates a fresh evaluator over the closure's own unit
//! and captured chain, so `ExprId`s are always resolved against the arena
//! they were allocated in.
//!
//! Submodules:
//!
//! - `attributes` - table read/write/delete, native attributes, indexing
//! - `call` - closures, natives, builtin methods, constructors
//! - `assign` - assignment targets and destructuring
//! - `control` - blocks, loops and signals
//! - `exceptions` - `try`, `raise`, `assert` and filter matching
//! - `collections` - literals, comprehensions and iteration
//! - `strings` - string literal macros
//! - `program` - program roots and position wrapping

mod assign;
mod attributes;
mod builder;
mod call;
mod collections;
mod control;
mod exceptions;
mod program;
mod strings;

pub use builder::InterpreterBuilder;
pub use exceptions::isa;

pub(crate) use collections::{into_pair, to_set};

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lagoon_ir::stack::ensure_sufficient_stack;
use lagoon_ir::{BinaryOp, ExprId, ExprKind, SourceText, Span, StmtId, StmtKind};
use tracing::{debug, trace};

use crate::builtins;
use crate::environment::ScopeChain;
use crate::errors::{EvalError, EvalResult};
use crate::operators;
use crate::print_handler::SharedPrintHandler;
use crate::signal::{Outcome, Signal};
use crate::value::{CodeUnit, Value};
use crate::LagoonError;

/// Default bound on nested calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// State shared by all evaluators of one interpreter.
pub struct Runtime {
    print_handler: SharedPrintHandler,
    file_path: Option<PathBuf>,
    max_call_depth: usize,
    call_depth: Cell<usize>,
    /// Failures currently being handled, innermost last. Bare `raise`
    /// re-raises the last one.
    handled: RefCell<Vec<EvalError>>,
    /// Unit and span of the last node whose evaluation started.
    last_unit: RefCell<Option<Rc<CodeUnit>>>,
    last_span: Cell<Span>,
}

impl Runtime {
    fn new(
        print_handler: SharedPrintHandler,
        file_path: Option<PathBuf>,
        max_call_depth: usize,
    ) -> Self {
        Runtime {
            print_handler,
            file_path,
            max_call_depth,
            call_depth: Cell::new(0),
            handled: RefCell::default(),
            last_unit: RefCell::default(),
            last_span: Cell::new(Span::DUMMY),
        }
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Records the node about to be evaluated.
    #[inline]
    fn mark(&self, unit: &Rc<CodeUnit>, span: Span) {
        self.last_span.set(span);
        let mut last = self.last_unit.borrow_mut();
        if !last.as_ref().is_some_and(|u| Rc::ptr_eq(u, unit)) {
            *last = Some(Rc::clone(unit));
        }
    }

    /// 1-based line and column of the last node started.
    fn last_position(&self) -> (u32, u32) {
        self.last_unit
            .borrow()
            .as_ref()
            .map_or((1, 1), |unit| unit.source.line_col(self.last_span.get()))
    }
}

/// A Lagoon interpreter.
///
/// Each run starts from a freshly seeded builtin namespace; the runtime
/// (print handler, limits) is shared by all runs.
pub struct Interpreter {
    rt: Runtime,
}

impl Interpreter {
    /// An interpreter printing to stdout with default limits.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.rt.print_handler()
    }

    pub fn runtime(&self) -> &Runtime {
        &self.rt
    }

    /// A fresh root chain: builtins plus an empty global namespace.
    pub fn root_chain(&self) -> ScopeChain {
        ScopeChain::root(builtins::seed(self.rt.file_path()))
    }

    /// Parses and runs a program, returning the final scope chain.
    pub fn run_source(&self, source: &str) -> Result<ScopeChain, LagoonError> {
        let mut text = SourceText::new(source);
        if let Some(path) = self.rt.file_path() {
            text = text.with_path(path);
        }
        let chain = self.root_chain();
        self.run_in(text, chain.clone())?;
        Ok(chain)
    }

    /// Reads and runs a program file. `__lagoonfile__` is the file's path.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<ScopeChain, LagoonError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LagoonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let chain = ScopeChain::root(builtins::seed(Some(path)));
        self.run_in(SourceText::new(source).with_path(path), chain.clone())?;
        Ok(chain)
    }

    /// Evaluates a single expression in a fresh root chain.
    pub fn eval_source(&self, source: &str) -> Result<Value, LagoonError> {
        let parsed = lagoon_parse::parse_expression(source)?;
        let unit = Rc::new(CodeUnit {
            source: Rc::new(SourceText::new(source)),
            arena: parsed.arena,
        });
        let mut ev = Evaluator::new(&self.rt, unit, self.root_chain());
        Ok(ev.eval_expr(parsed.root)?)
    }

    fn run_in(&self, text: SourceText, chain: ScopeChain) -> Result<(), LagoonError> {
        debug!(source = %text.name(), "run program");
        let program = lagoon_parse::parse_program(text.text())?;
        let unit = Rc::new(CodeUnit {
            source: Rc::new(text),
            arena: program.arena,
        });
        let mut ev = Evaluator::new(&self.rt, unit, chain);
        ev.run_program(&program.body)?;
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

/// Evaluation context: a syntax tree, the scope chain it runs in, and the
/// shared runtime.
pub struct Evaluator<'rt> {
    rt: &'rt Runtime,
    unit: Rc<CodeUnit>,
    chain: ScopeChain,
}

impl<'rt> Evaluator<'rt> {
    pub fn new(rt: &'rt Runtime, unit: Rc<CodeUnit>, chain: ScopeChain) -> Self {
        Evaluator { rt, unit, chain }
    }

    /// An evaluator over another unit sharing this one's runtime.
    pub fn for_unit(&self, unit: Rc<CodeUnit>, chain: ScopeChain) -> Evaluator<'rt> {
        Evaluator::new(self.rt, unit, chain)
    }

    pub fn runtime(&self) -> &'rt Runtime {
        self.rt
    }

    pub fn chain(&self) -> &ScopeChain {
        &self.chain
    }

    pub fn unit(&self) -> &Rc<CodeUnit> {
        &self.unit
    }

    /// Evaluates an expression of this evaluator's unit.
    pub fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(id))
    }

    fn eval_expr_inner(&mut self, id: ExprId) -> EvalResult {
        let unit = Rc::clone(&self.unit);
        let expr = unit.arena.expr(id);
        self.rt.mark(&unit, expr.span);
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Float(f) => Ok(Value::Float(*f)),
            ExprKind::Str(lit) => self.eval_str_lit(lit),
            ExprKind::Name(name) => self.chain.resolve(name),
            ExprKind::NumberedArg(index) => self.numbered_arg(*index),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(*operand)?;
                operators::unary(*op, &value)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right),
            ExprKind::Range { start, end, closed } => self.eval_range(*start, *end, *closed),
            ExprKind::IfElse {
                then,
                cond,
                otherwise,
            } => {
                if self.eval_expr(*cond)?.is_truthy() {
                    self.eval_expr(*then)
                } else {
                    self.eval_expr(*otherwise)
                }
            }
            ExprKind::TryElse {
                body,
                filter,
                fallback,
            } => self.eval_try_else(*body, *filter, *fallback),
            ExprKind::Call { callee, args } => self.eval_call(*callee, args),
            ExprKind::Attr { receiver, name } => {
                let receiver = self.eval_expr(*receiver)?;
                self.get_attr(&receiver, name)
            }
            ExprKind::Index { receiver, key } => {
                let receiver = self.eval_expr(*receiver)?;
                let key = self.eval_expr(*key)?;
                self.get_index(&receiver, &key)
            }
            ExprKind::Collection { kind, body } => self.eval_collection(*kind, body),
            ExprKind::Mapping { kind, body } => self.eval_mapping(*kind, body),
            ExprKind::Table(fields) => self.eval_table(fields),
            ExprKind::Callable(def) => self.eval_callable(def),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        let left = self.eval_expr(left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => return Ok(left),
            BinaryOp::Or if left.is_truthy() => return Ok(left),
            BinaryOp::And | BinaryOp::Or => return self.eval_expr(right),
            _ => {}
        }
        let right = self.eval_expr(right)?;
        match (op, &right) {
            (BinaryOp::Isa, filter) => isa(&left, filter).map(Value::Bool),
            (BinaryOp::In, Value::Generator(generator)) => {
                while let Some(item) = generator.next(self)? {
                    if item.equals(&left) {
                        return Ok(Value::Bool(true));
                    }
                }
                Ok(Value::Bool(false))
            }
            _ => operators::binary(op, &left, &right),
        }
    }

    /// `%N`: element `N` of the innermost visible `args`.
    fn numbered_arg(&self, index: usize) -> EvalResult {
        let args = self
            .chain
            .lookup("args")
            .ok_or_else(crate::errors::numbered_arg_outside_function)?;
        let items = args
            .sized_items()
            .ok_or_else(crate::errors::numbered_arg_outside_function)?;
        items
            .into_iter()
            .nth(index)
            .ok_or_else(crate::errors::numbered_arg_missing)
    }

    /// Executes a statement of this evaluator's unit.
    pub fn exec_stmt(&mut self, id: StmtId) -> Result<Outcome, EvalError> {
        ensure_sufficient_stack(|| self.exec_stmt_inner(id))
    }

    fn exec_stmt_inner(&mut self, id: StmtId) -> Result<Outcome, EvalError> {
        let unit = Rc::clone(&self.unit);
        let stmt = unit.arena.stmt(id);
        self.rt.mark(&unit, stmt.span);
        trace!(start = stmt.span.start, end = stmt.span.end, "exec statement");
        match &stmt.kind {
            StmtKind::Expr(expr) => self.eval_expr(*expr).map(Outcome::Value),
            StmtKind::Assign { target, op, values } => {
                self.exec_assign(target, *op, values)?;
                Ok(Outcome::NONE)
            }
            StmtKind::If {
                branches,
                otherwise,
            } => {
                for (cond, block) in branches {
                    if self.eval_expr(*cond)?.is_truthy() {
                        return self.exec_block(block);
                    }
                }
                match otherwise {
                    Some(block) => self.exec_block(block),
                    None => Ok(Outcome::NONE),
                }
            }
            StmtKind::While { cond, body } => self.exec_while(*cond, body),
            StmtKind::For { target, iter, body } => self.exec_for(target, *iter, body),
            StmtKind::Times { count, body } => self.exec_times(*count, body),
            StmtKind::Continue => Ok(Outcome::Signal(Signal::Continue)),
            StmtKind::Break(depth) => self.exec_break(*depth),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(*expr)?,
                    None => Value::None,
                };
                Ok(Outcome::Signal(Signal::Return(value)))
            }
            StmtKind::Try { body, handlers } => self.exec_try(body, handlers),
            StmtKind::Raise(value) => Err(self.exec_raise(*value)?),
            StmtKind::Assert(value) => {
                self.exec_assert(*value)?;
                Ok(Outcome::NONE)
            }
        }
    }
}

#[cfg(test)]
mod tests;
