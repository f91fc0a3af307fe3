//! Lagoon IR - syntax tree and source bookkeeping.
//!
//! This crate holds the data shared by every stage of the interpreter:
//! - [`Span`] byte ranges into a source text
//! - [`SourceText`] with line/column recovery for error reports
//! - the arena-allocated syntax tree ([`ExprArena`], [`Expr`], [`Stmt`])
//! - [`StringMacros`], the suffix letters of string literals
//!
//! Expressions and statements are stored flat in an [`ExprArena`] and
//! referenced by [`ExprId`]/[`StmtId`]. A parsed unit owns its arena, so a
//! closure keeps its defining unit alive by holding a shared handle to it.

pub mod ast;
mod source;
mod span;
pub mod stack;
mod string_macros;

pub use ast::{
    AssignOp, BinaryOp, Block, CallArg, CallableDef, CollectionKind, Comprehension, Expr,
    ExprArena, ExprId, ExprKind, Handler, MapBody, MappingKind, Param, ParamDefault, SeqBody,
    Stmt, StmtId, StmtKind, StrLit, TableField, Target, UnaryOp,
};
pub use source::{LineOffsetTable, SourceText};
pub use span::Span;
pub use string_macros::StringMacros;

/// Identifier text. Shared so that binding a name at runtime is a refcount bump.
pub type Ident = std::rc::Rc<str>;
