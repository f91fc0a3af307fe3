//! Operator matching helpers.

use lagoon_ir::{BinaryOp, UnaryOp};
use lagoon_lexer::TokenKind;

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            TokenKind::Is => Some(BinaryOp::Is),
            TokenKind::In => Some(BinaryOp::In),
            TokenKind::Isa => Some(BinaryOp::Isa),
            _ => None,
        }
    }

    /// `Some(closed)` when at a range operator.
    pub(crate) fn match_range_op(&self) -> Option<bool> {
        match self.current_kind() {
            TokenKind::DotDot => Some(false),
            TokenKind::DotDotDot => Some(true),
            _ => None,
        }
    }

    pub(crate) fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    pub(crate) fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        }
    }
}
