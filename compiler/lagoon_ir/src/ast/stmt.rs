//! Statement nodes and assignment targets.

use std::fmt;

use super::operators::AssignOp;
use super::{ExprId, StmtId};
use crate::{Ident, Span};

/// Statement node.
#[derive(Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    Expr(ExprId),

    /// `targets op values`. More than one value builds a tuple.
    Assign {
        target: Target,
        op: AssignOp,
        values: Vec<ExprId>,
    },

    /// `if c {..} elif c {..} else {..}`
    If {
        branches: Vec<(ExprId, Block)>,
        otherwise: Option<Block>,
    },
    While {
        cond: ExprId,
        body: Block,
    },
    For {
        target: Target,
        iter: ExprId,
        body: Block,
    },
    Times {
        count: ExprId,
        body: Block,
    },

    Continue,
    /// `break [depth]`
    Break(Option<ExprId>),
    Return(Option<ExprId>),

    Try {
        body: Block,
        handlers: Vec<Handler>,
    },
    /// `raise [value]`; bare `raise` re-raises the active failure.
    Raise(Option<ExprId>),
    Assert(Option<ExprId>),
}

/// A brace-delimited statement sequence.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Block {
    pub stmts: Vec<StmtId>,
    pub span: Span,
}

/// `except [filter] [as name] { body }`
#[derive(Clone, PartialEq, Debug)]
pub struct Handler {
    pub filter: Option<ExprId>,
    pub name: Option<Ident>,
    pub body: Block,
    pub span: Span,
}

/// Left-hand side of an assignment, a `for` loop or a comprehension.
///
/// Receivers and keys are ordinary expressions; only the final step is
/// treated as a store.
#[derive(Clone, PartialEq, Debug)]
pub enum Target {
    Name {
        name: Ident,
        span: Span,
    },
    Attr {
        receiver: ExprId,
        name: Ident,
        span: Span,
    },
    Index {
        receiver: ExprId,
        key: ExprId,
        span: Span,
    },
    /// Destructuring: `a, (b, c)`.
    Tuple {
        elements: Vec<Target>,
        span: Span,
    },
}

impl Target {
    pub fn span(&self) -> Span {
        match self {
            Target::Name { span, .. }
            | Target::Attr { span, .. }
            | Target::Index { span, .. }
            | Target::Tuple { span, .. } => *span,
        }
    }

    pub fn is_destructuring(&self) -> bool {
        matches!(self, Target::Tuple { .. })
    }
}
