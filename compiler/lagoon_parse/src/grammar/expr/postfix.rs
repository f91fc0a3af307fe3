//! Chain suffixes: `(args)`, `.name`, `[key]`.

use lagoon_ir::{CallArg, Expr, ExprId, ExprKind};
use lagoon_lexer::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// A primary followed by any number of suffixes.
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        let start = self.expr_span(expr);

        loop {
            let kind = match self.current_kind() {
                TokenKind::LParen => {
                    let args = self
                        .parse_call_args()
                        .map_err(|e| e.in_context(ErrorContext::CallArgs))?;
                    ExprKind::Call { callee: expr, args }
                }
                TokenKind::Dot => {
                    self.advance();
                    let (name, _) = self.expect_ident()?;
                    ExprKind::Attr {
                        receiver: expr,
                        name,
                    }
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.cursor.skip_newlines();
                    let key = self.parse_expr()?;
                    self.cursor.skip_newlines();
                    self.expect(&TokenKind::RBracket)?;
                    ExprKind::Index {
                        receiver: expr,
                        key,
                    }
                }
                _ => return Ok(expr),
            };
            let span = self.span_from(start);
            expr = self.alloc_expr(Expr::new(kind, span));
        }
    }

    /// `( [name =] expr, ... )`
    fn parse_call_args(&mut self) -> Result<Vec<CallArg>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            let start = self.current_span();
            let name = match (self.current_kind(), self.cursor.peek_next_kind()) {
                (TokenKind::Ident(name), TokenKind::Eq) => {
                    self.advance();
                    self.advance();
                    self.cursor.skip_newlines();
                    Some(name.clone())
                }
                _ => None,
            };
            let value = self.parse_expr()?;
            args.push(CallArg {
                name,
                value,
                span: self.span_from(start),
            });
            self.cursor.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                self.cursor.skip_newlines();
                self.expect(&TokenKind::RParen)?;
                return Ok(args);
            }
        }
    }
}
