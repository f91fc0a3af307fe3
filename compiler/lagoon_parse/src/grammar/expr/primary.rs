//! Primary expressions: literals, names, sigils, tables and callables.

use lagoon_ir::{
    CallableDef, Expr, ExprId, ExprKind, Ident, Param, ParamDefault, StrLit, StringMacros,
    TableField,
};
use lagoon_lexer::TokenKind;
use tracing::trace;

use crate::{ErrorContext, ParseError, Parser};

/// Name bound to each sigil: `$` globals, `@` receiver, `^` parent, `%` arguments.
fn sigil_binding(kind: &TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Dollar => Some("globalvars"),
        TokenKind::At => Some("current"),
        TokenKind::Caret => Some("parent"),
        TokenKind::Percent => Some("args"),
        _ => None,
    }
}

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let span = token.span;
        let kind = match &token.kind {
            TokenKind::Int(n) => {
                self.advance();
                ExprKind::Int(*n)
            }
            TokenKind::Float(f) => {
                self.advance();
                ExprKind::Float(*f)
            }
            TokenKind::Str(lit) => {
                self.advance();
                ExprKind::Str(lit.clone())
            }
            TokenKind::Ident(name) => {
                self.advance();
                ExprKind::Name(name.clone())
            }
            TokenKind::Dollar | TokenKind::At | TokenKind::Caret | TokenKind::Percent => {
                return self.parse_sigil_chain();
            }
            TokenKind::LParen => return self.parse_paren(),
            TokenKind::LBracket
            | TokenKind::LBracePipe
            | TokenKind::LParenPipe
            | TokenKind::LBraceColon
            | TokenKind::LBracketColon => {
                return self
                    .parse_collection()
                    .map_err(|e| e.in_context(ErrorContext::Collection));
            }
            TokenKind::LBrace => {
                return self
                    .parse_table()
                    .map_err(|e| e.in_context(ErrorContext::Table));
            }
            TokenKind::Fn => {
                return self
                    .parse_callable()
                    .map_err(|e| e.in_context(ErrorContext::Callable));
            }
            _ => {
                return Err(self
                    .unexpected("an expression")
                    .in_context(ErrorContext::Expression))
            }
        };
        Ok(self.alloc_expr(Expr::new(kind, span)))
    }

    /// `%N`, or a run of adjacent sigils optionally followed by a name.
    ///
    /// `@^x` reads as `current.parent.x`; a name after `%` indexes `args`.
    fn parse_sigil_chain(&mut self) -> Result<ExprId, ParseError> {
        let first = self.advance();
        let start = first.span;

        if matches!(first.kind, TokenKind::Percent) && self.cursor.touches_previous() {
            if let TokenKind::Int(n) = self.current_kind() {
                self.advance();
                let index = usize::try_from(*n).unwrap_or(usize::MAX);
                let span = self.span_from(start);
                return Ok(self.alloc_expr(Expr::new(ExprKind::NumberedArg(index), span)));
            }
        }

        let head = sigil_binding(&first.kind).unwrap_or("current");
        let mut expr = self.alloc_expr(Expr::new(ExprKind::Name(Ident::from(head)), start));
        let mut after_percent = matches!(first.kind, TokenKind::Percent);

        while self.cursor.touches_previous() {
            let token = self.cursor.current();
            let kind = if let Some(binding) = sigil_binding(&token.kind) {
                self.advance();
                after_percent = matches!(token.kind, TokenKind::Percent);
                ExprKind::Attr {
                    receiver: expr,
                    name: Ident::from(binding),
                }
            } else if let TokenKind::Ident(name) = &token.kind {
                self.advance();
                let kind = if after_percent {
                    let key = self.alloc_expr(Expr::new(
                        ExprKind::Str(StrLit {
                            text: name.to_string(),
                            macros: StringMacros::empty(),
                            content_start: token.span.start,
                        }),
                        token.span,
                    ));
                    ExprKind::Index {
                        receiver: expr,
                        key,
                    }
                } else {
                    ExprKind::Attr {
                        receiver: expr,
                        name: name.clone(),
                    }
                };
                let span = self.span_from(start);
                return Ok(self.alloc_expr(Expr::new(kind, span)));
            } else {
                break;
            };
            let span = self.span_from(start);
            expr = self.alloc_expr(Expr::new(kind, span));
        }
        Ok(expr)
    }

    /// `{ name = expr, ... }`; fields may also be separated by newlines.
    fn parse_table(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();
        loop {
            self.cursor.skip_newlines();
            if self.eat(&TokenKind::RBrace) {
                break;
            }
            let (name, name_span) = self.expect_ident()?;
            self.expect(&TokenKind::Eq)?;
            self.cursor.skip_newlines();
            let value = self.parse_expr()?;
            fields.push(TableField {
                name,
                value,
                span: self.span_from(name_span),
            });
            if self.eat(&TokenKind::Comma) || self.check(&TokenKind::Newline) {
                continue;
            }
            self.expect(&TokenKind::RBrace)?;
            break;
        }
        let span = self.span_from(start);
        Ok(self.alloc_expr(Expr::new(ExprKind::Table(fields), span)))
    }

    /// `fn [(params)] { body }`
    fn parse_callable(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::Fn)?;
        let mut params = Vec::new();
        if self.eat(&TokenKind::LParen) {
            loop {
                self.cursor.skip_newlines();
                if self.eat(&TokenKind::RParen) {
                    break;
                }
                let (name, name_span) = self.expect_ident()?;
                let default = if self.eat(&TokenKind::Eq) {
                    ParamDefault::Static(self.parse_expr()?)
                } else if self.eat(&TokenKind::ColonEq) {
                    ParamDefault::Dynamic(self.parse_expr()?)
                } else {
                    ParamDefault::None
                };
                params.push(Param {
                    name,
                    default,
                    span: self.span_from(name_span),
                });
                self.cursor.skip_newlines();
                if !self.eat(&TokenKind::Comma) {
                    self.expect(&TokenKind::RParen)?;
                    break;
                }
            }
        }
        trace!(params = params.len(), "callable literal");
        let body = self.parse_braced_block()?;
        let span = self.span_from(start);
        Ok(self.alloc_expr(Expr::new(
            ExprKind::Callable(CallableDef { params, body }),
            span,
        )))
    }
}
