//! Recursive descent parser for Lagoon.
//!
//! Produces a flat syntax tree in an [`ExprArena`]. Two entry points exist:
//! [`parse_program`] for whole scripts and [`parse_expression`] for the
//! single expressions handed to `eval` and to `#{...}` interpolation.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError};

use lagoon_ir::{Block, Expr, ExprArena, ExprId, Span, Stmt, StmtId};
use lagoon_lexer::{Token, TokenKind, TokenList};
use tracing::trace;

/// A parsed script.
#[derive(Debug)]
pub struct Program {
    pub arena: ExprArena,
    pub body: Block,
}

/// A parsed standalone expression.
#[derive(Debug)]
pub struct ParsedExpr {
    pub arena: ExprArena,
    pub root: ExprId,
}

/// Parse a whole program.
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    trace!(len = source.len(), "parse_program");
    let tokens = lagoon_lexer::lex(source)?;
    let mut parser = Parser::new(&tokens);
    let body = parser.parse_top_block()?;
    Ok(Program {
        arena: parser.arena,
        body,
    })
}

/// Parse a single expression. Leading and trailing newlines are allowed.
pub fn parse_expression(source: &str) -> Result<ParsedExpr, ParseError> {
    parse_expression_at(source, 0)
}

/// Parse an expression that sits at byte offset `base` of some larger text.
///
/// Spans in the result are relative to that larger text.
pub fn parse_expression_at(source: &str, base: u32) -> Result<ParsedExpr, ParseError> {
    trace!(len = source.len(), base, "parse_expression");
    let mut tokens = lagoon_lexer::lex(source)?;
    tokens.shift(base);
    let mut parser = Parser::new(&tokens);
    parser.cursor.skip_newlines();
    let root = parser.parse_expr()?;
    parser.cursor.skip_newlines();
    if !parser.cursor.is_at_end() {
        return Err(parser.unexpected("end of expression"));
    }
    Ok(ParsedExpr {
        arena: parser.arena,
        root,
    })
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            arena: ExprArena::new(),
        }
    }

    #[inline]
    fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    /// Consume the current token if it matches.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("`{}`", kind.symbol())))
        }
    }

    fn expect_ident(&mut self) -> Result<(lagoon_ir::Ident, Span), ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name.clone(), span))
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    #[cold]
    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(
            format!("expected {expected}, found {}", self.current_kind().describe()),
            self.current_span(),
        )
    }

    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc_expr(expr)
    }

    fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        self.arena.alloc_stmt(stmt)
    }

    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.expr(id).span
    }
}
