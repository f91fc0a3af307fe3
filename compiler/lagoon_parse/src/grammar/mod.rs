//! Grammar rules.
//!
//! - `mod.rs`: blocks and statements
//! - `target.rs`: assignment / loop targets
//! - `expr/`: expressions

mod expr;
mod target;

use lagoon_ir::stack::ensure_sufficient_stack;
use lagoon_ir::{AssignOp, Block, CollectionKind, Expr, ExprKind, Handler, SeqBody, Span, Stmt, StmtId, StmtKind};
use lagoon_lexer::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Statements up to end of input.
    pub(crate) fn parse_top_block(&mut self) -> Result<Block, ParseError> {
        let start = self.current_span();
        let stmts = self.parse_stmts_until(&TokenKind::Eof)?;
        Ok(Block {
            stmts,
            span: start.merge(self.previous_span()),
        })
    }

    /// `{ stmt* }`
    pub(crate) fn parse_braced_block(&mut self) -> Result<Block, ParseError> {
        self.cursor.skip_newlines();
        let start = self
            .expect(&TokenKind::LBrace)
            .map_err(|e| e.in_context(ErrorContext::Block))?;
        let stmts = self.parse_stmts_until(&TokenKind::RBrace)?;
        self.expect(&TokenKind::RBrace)
            .map_err(|e| e.in_context(ErrorContext::Block))?;
        Ok(Block {
            stmts,
            span: self.span_from(start),
        })
    }

    fn parse_stmts_until(&mut self, end: &TokenKind) -> Result<Vec<StmtId>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            while self.eat(&TokenKind::Newline) || self.eat(&TokenKind::Semicolon) {}
            if self.check(end) || self.cursor.is_at_end() {
                return Ok(stmts);
            }
            stmts.push(self.parse_stmt()?);
            if !self.at_stmt_end() {
                return Err(self
                    .unexpected("a newline or `;` after the statement")
                    .in_context(ErrorContext::Statement));
            }
        }
    }

    fn at_stmt_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        )
    }

    fn parse_stmt(&mut self) -> Result<StmtId, ParseError> {
        ensure_sufficient_stack(|| self.parse_stmt_inner())
    }

    fn parse_stmt_inner(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::If => self.parse_if()?,
            TokenKind::While => {
                self.advance();
                let cond = self.parse_expr()?;
                let body = self.parse_braced_block()?;
                StmtKind::While { cond, body }
            }
            TokenKind::For => {
                self.advance();
                let target = self.parse_target_list()?;
                self.expect(&TokenKind::In)?;
                let iter = self.parse_expr()?;
                let body = self.parse_braced_block()?;
                StmtKind::For { target, iter, body }
            }
            TokenKind::Times => {
                self.advance();
                let count = self.parse_expr()?;
                let body = self.parse_braced_block()?;
                StmtKind::Times { count, body }
            }
            TokenKind::Try => self.parse_try()?,
            TokenKind::Continue => {
                self.advance();
                StmtKind::Continue
            }
            TokenKind::Break => {
                self.advance();
                StmtKind::Break(self.parse_optional_expr()?)
            }
            TokenKind::Return => {
                self.advance();
                StmtKind::Return(self.parse_optional_expr()?)
            }
            TokenKind::Raise => {
                self.advance();
                StmtKind::Raise(self.parse_optional_expr()?)
            }
            TokenKind::Assert => {
                self.advance();
                StmtKind::Assert(self.parse_optional_expr()?)
            }
            _ => self.parse_simple_stmt(start)?,
        };
        let span = self.span_from(start);
        Ok(self.alloc_stmt(Stmt::new(kind, span)))
    }

    fn parse_optional_expr(&mut self) -> Result<Option<lagoon_ir::ExprId>, ParseError> {
        if self.at_stmt_end() {
            Ok(None)
        } else {
            self.parse_expr().map(Some)
        }
    }

    /// Expression statement or assignment.
    fn parse_simple_stmt(&mut self, start: Span) -> Result<StmtKind, ParseError> {
        let exprs = self.parse_expr_list()?;
        if let Some(op) = self.match_assign_op() {
            self.advance();
            self.cursor.skip_newlines();
            let target = self.exprs_to_target(&exprs, self.span_from(start))?;
            let values = self.parse_expr_list()?;
            return Ok(StmtKind::Assign { target, op, values });
        }
        match exprs.as_slice() {
            [single] => Ok(StmtKind::Expr(*single)),
            _ => {
                let span = self.span_from(start);
                let tuple = self.alloc_expr(Expr::new(
                    ExprKind::Collection {
                        kind: CollectionKind::Tuple,
                        body: SeqBody::Items(exprs),
                    },
                    span,
                ));
                Ok(StmtKind::Expr(tuple))
            }
        }
    }

    fn match_assign_op(&self) -> Option<AssignOp> {
        match self.current_kind() {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::Add),
            TokenKind::MinusEq => Some(AssignOp::Sub),
            TokenKind::StarEq => Some(AssignOp::Mul),
            TokenKind::SlashEq => Some(AssignOp::Div),
            _ => None,
        }
    }

    /// `if c {..} [elif c {..}]* [else {..}]`
    fn parse_if(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let mut branches = Vec::new();
        let cond = self.parse_expr()?;
        branches.push((cond, self.parse_braced_block()?));

        while matches!(self.cursor.peek_past_newlines(), TokenKind::Elif) {
            self.cursor.skip_newlines();
            self.advance();
            let cond = self.parse_expr()?;
            branches.push((cond, self.parse_braced_block()?));
        }

        let otherwise = if matches!(self.cursor.peek_past_newlines(), TokenKind::Else) {
            self.cursor.skip_newlines();
            self.advance();
            Some(self.parse_braced_block()?)
        } else {
            None
        };
        Ok(StmtKind::If {
            branches,
            otherwise,
        })
    }

    /// `try {..} (except [filter] [as name] {..})+`
    fn parse_try(&mut self) -> Result<StmtKind, ParseError> {
        self.advance();
        let body = self.parse_braced_block()?;
        let mut handlers = Vec::new();

        while matches!(self.cursor.peek_past_newlines(), TokenKind::Except) {
            self.cursor.skip_newlines();
            let start = self.advance().span;
            let filter = if self.check(&TokenKind::As) || self.check(&TokenKind::LBrace) {
                None
            } else {
                Some(self.parse_expr()?)
            };
            let name = if self.eat(&TokenKind::As) {
                Some(self.expect_ident()?.0)
            } else {
                None
            };
            let body = self.parse_braced_block()?;
            handlers.push(Handler {
                filter,
                name,
                body,
                span: self.span_from(start),
            });
        }

        if handlers.is_empty() {
            return Err(self
                .unexpected("`except`")
                .in_context(ErrorContext::Statement));
        }
        Ok(StmtKind::Try { body, handlers })
    }
}
