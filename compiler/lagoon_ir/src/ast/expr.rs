//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use super::stmt::{Block, Target};
use super::ExprId;
use crate::{Ident, Span, StringMacros};

/// Expression node.
#[derive(Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression kinds.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Str(StrLit),

    /// Plain name looked up through the scope chain.
    Name(Ident),
    /// `%N`: element `N` of the enclosing call's `args`.
    NumberedArg(usize),

    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// `start..end` or `start...end`; a missing start means 0.
    Range {
        start: Option<ExprId>,
        end: ExprId,
        closed: bool,
    },
    /// `then if cond else otherwise`
    IfElse {
        then: ExprId,
        cond: ExprId,
        otherwise: ExprId,
    },
    /// `body except filter else fallback`
    TryElse {
        body: ExprId,
        filter: ExprId,
        fallback: ExprId,
    },

    // Chain suffixes
    Call {
        callee: ExprId,
        args: Vec<CallArg>,
    },
    Attr {
        receiver: ExprId,
        name: Ident,
    },
    Index {
        receiver: ExprId,
        key: ExprId,
    },

    // Literals with bodies
    Collection {
        kind: CollectionKind,
        body: SeqBody,
    },
    Mapping {
        kind: MappingKind,
        body: MapBody,
    },
    Table(Vec<TableField>),
    Callable(CallableDef),
}

/// A string literal after escape processing, with its suffix letters.
#[derive(Clone, PartialEq, Debug)]
pub struct StrLit {
    pub text: String,
    pub macros: StringMacros,
    /// Byte offset of the first content character in the source, so that
    /// spans inside interpolated `#{...}` bodies can be reported in place.
    pub content_start: u32,
}

/// One argument of a call suffix.
#[derive(Clone, PartialEq, Debug)]
pub struct CallArg {
    /// `Some` for `name = value` arguments.
    pub name: Option<Ident>,
    pub value: ExprId,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CollectionKind {
    /// `[ ... ]`
    List,
    /// `( ... , )`
    Tuple,
    /// `{| ... |}`
    Set,
    /// `(| ... |)`
    FrozenSet,
    /// `( ... for ... )`
    Generator,
}

impl CollectionKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Set => "set",
            Self::FrozenSet => "frozenset",
            Self::Generator => "generator",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MappingKind {
    /// `{: k: v :}`
    Dict,
    /// `[: k: v :]`
    OrderedDict,
}

/// Body of a sequence literal.
#[derive(Clone, PartialEq, Debug)]
pub enum SeqBody {
    Items(Vec<ExprId>),
    Comprehension(Box<Comprehension<ExprId>>),
}

/// Body of a mapping literal.
#[derive(Clone, PartialEq, Debug)]
pub enum MapBody {
    Items(Vec<(ExprId, ExprId)>),
    Comprehension(Box<Comprehension<(ExprId, ExprId)>>),
}

/// `[element] for target in iter [if cond]`.
///
/// `E` is the element shape: one expression for sequences, a key/value
/// pair for mappings. Without an element the raw item is yielded.
#[derive(Clone, PartialEq, Debug)]
pub struct Comprehension<E> {
    pub element: Option<E>,
    pub target: Target,
    pub iter: ExprId,
    pub cond: Option<ExprId>,
}

/// `name = value` inside a table literal.
#[derive(Clone, PartialEq, Debug)]
pub struct TableField {
    pub name: Ident,
    pub value: ExprId,
    pub span: Span,
}

/// `fn(params) { body }`
#[derive(Clone, PartialEq, Debug)]
pub struct CallableDef {
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Param {
    pub name: Ident,
    pub default: ParamDefault,
    pub span: Span,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParamDefault {
    None,
    /// `name = expr`: evaluated once when the callable is created.
    Static(ExprId),
    /// `name := expr`: evaluated on every call, in the defining scope.
    Dynamic(ExprId),
}
