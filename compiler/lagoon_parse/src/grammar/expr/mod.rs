//! Expression parsing.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point (`parse_expr`) and the binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `postfix.rs`: call, attribute and index suffixes
//! - `primary.rs`: literals, names, sigils, tables, callables
//! - `collections.rs`: sequence and mapping literals, comprehensions

mod collections;
mod operators;
mod postfix;
mod primary;

use lagoon_ir::stack::ensure_sufficient_stack;
use lagoon_ir::{BinaryOp, Expr, ExprId, ExprKind, UnaryOp};
use lagoon_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression, including the `a if c else b` and
    /// `a except E else b` forms.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_or()?;
        let start = self.expr_span(first);

        if self.eat(&TokenKind::If) {
            let cond = self.parse_or()?;
            self.expect(&TokenKind::Else)?;
            let otherwise = self.parse_expr()?;
            let span = self.span_from(start);
            return Ok(self.alloc_expr(Expr::new(
                ExprKind::IfElse {
                    then: first,
                    cond,
                    otherwise,
                },
                span,
            )));
        }

        if self.eat(&TokenKind::Except) {
            let filter = self.parse_or()?;
            self.expect(&TokenKind::Else)?;
            let fallback = self.parse_expr()?;
            let span = self.span_from(start);
            return Ok(self.alloc_expr(Expr::new(
                ExprKind::TryElse {
                    body: first,
                    filter,
                    fallback,
                },
                span,
            )));
        }

        Ok(first)
    }

    /// Comma-separated expressions (statement level).
    pub(crate) fn parse_expr_list(&mut self) -> Result<Vec<ExprId>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            self.cursor.skip_newlines();
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.expr_span(left).merge(self.expr_span(right));
        self.alloc_expr(Expr::new(ExprKind::Binary { op, left, right }, span))
    }

    /// `or` (lowest binary precedence).
    pub(crate) fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            self.cursor.skip_newlines();
            let right = self.parse_and()?;
            left = self.binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_not()?;
        while self.eat(&TokenKind::And) {
            self.cursor.skip_newlines();
            let right = self.parse_not()?;
            left = self.binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<ExprId, ParseError> {
        if self.check(&TokenKind::Not) {
            let start = self.advance().span;
            let operand = ensure_sufficient_stack(|| self.parse_not())?;
            let span = self.span_from(start);
            return Ok(self.alloc_expr(Expr::new(
                ExprKind::Unary {
                    op: UnaryOp::Not,
                    operand,
                },
                span,
            )));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_range()?;
        while let Some(op) = self.match_comparison_op() {
            self.advance();
            self.cursor.skip_newlines();
            let right = self.parse_range()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    /// `[start] .. end` / `[start] ... end`
    fn parse_range(&mut self) -> Result<ExprId, ParseError> {
        let start_span = self.current_span();
        let start = if self.match_range_op().is_some() {
            None
        } else {
            let left = self.parse_sum()?;
            if self.match_range_op().is_none() {
                return Ok(left);
            }
            Some(left)
        };
        let closed = self.match_range_op().unwrap_or(false);
        self.advance();
        let end = self.parse_sum()?;
        let span = self.span_from(start_span);
        Ok(self.alloc_expr(Expr::new(ExprKind::Range { start, end, closed }, span)))
    }

    fn parse_sum(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_term()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            self.cursor.skip_newlines();
            let right = self.parse_term()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            self.cursor.skip_newlines();
            let right = self.parse_unary()?;
            left = self.binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let start = self.advance().span;
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = self.span_from(start);
            return Ok(self.alloc_expr(Expr::new(ExprKind::Unary { op, operand }, span)));
        }
        self.parse_power()
    }

    /// `chain ** unary` (right associative, binds tighter than unary minus
    /// on its left).
    fn parse_power(&mut self) -> Result<ExprId, ParseError> {
        let base = self.parse_postfix()?;
        if self.eat(&TokenKind::StarStar) {
            let exponent = self.parse_unary()?;
            return Ok(self.binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }
}
