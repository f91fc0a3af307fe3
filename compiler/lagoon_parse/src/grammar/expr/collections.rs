//! Sequence and mapping literals.
//!
//! | Open | Close | Literal |
//! |---|---|---|
//! | `[` | `]` | list |
//! | `(` | `)` | tuple, generator, or parenthesized expression |
//! | `{\|` | `\|}` | set |
//! | `(\|` | `\|)` | frozen set |
//! | `{:` | `:}` | dict |
//! | `[:` | `:]` | ordered dict |

use lagoon_ir::{
    CollectionKind, Comprehension, Expr, ExprId, ExprKind, MapBody, MappingKind, SeqBody,
};
use lagoon_lexer::TokenKind;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_collection(&mut self) -> Result<ExprId, ParseError> {
        let open = self.advance();
        let start = open.span;
        let kind = match open.kind {
            TokenKind::LBracket => self.seq_literal(CollectionKind::List, &TokenKind::RBracket)?,
            TokenKind::LBracePipe => {
                self.seq_literal(CollectionKind::Set, &TokenKind::PipeRBrace)?
            }
            TokenKind::LParenPipe => {
                self.seq_literal(CollectionKind::FrozenSet, &TokenKind::PipeRParen)?
            }
            TokenKind::LBraceColon => {
                self.map_literal(MappingKind::Dict, &TokenKind::ColonRBrace)?
            }
            _ => self.map_literal(MappingKind::OrderedDict, &TokenKind::ColonRBracket)?,
        };
        let span = self.span_from(start);
        Ok(self.alloc_expr(Expr::new(kind, span)))
    }

    fn seq_literal(&mut self, kind: CollectionKind, close: &TokenKind) -> Result<ExprKind, ParseError> {
        let body = self.parse_seq_body(close)?;
        self.cursor.skip_newlines();
        self.expect(close)?;
        Ok(ExprKind::Collection { kind, body })
    }

    fn map_literal(&mut self, kind: MappingKind, close: &TokenKind) -> Result<ExprKind, ParseError> {
        let body = self.parse_map_body(close)?;
        self.cursor.skip_newlines();
        self.expect(close)?;
        Ok(ExprKind::Mapping { kind, body })
    }

    /// `()` empty tuple, `(e)` grouping, `(a, b)` tuple, `(e for ...)` generator.
    pub(crate) fn parse_paren(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(&TokenKind::LParen)?;
        self.cursor.skip_newlines();

        let kind = if self.check(&TokenKind::RParen) || self.check(&TokenKind::For) {
            let body = self.parse_seq_body(&TokenKind::RParen)?;
            let kind = match body {
                SeqBody::Items(_) => CollectionKind::Tuple,
                SeqBody::Comprehension(_) => CollectionKind::Generator,
            };
            ExprKind::Collection { kind, body }
        } else {
            let first = self.parse_expr()?;
            self.cursor.skip_newlines();
            if self.check(&TokenKind::For) {
                let comp = self.parse_comprehension(Some(first))?;
                ExprKind::Collection {
                    kind: CollectionKind::Generator,
                    body: SeqBody::Comprehension(Box::new(comp)),
                }
            } else if self.eat(&TokenKind::RParen) {
                return Ok(first);
            } else {
                let items = self.parse_more_items(first, &TokenKind::RParen)?;
                ExprKind::Collection {
                    kind: CollectionKind::Tuple,
                    body: SeqBody::Items(items),
                }
            }
        };

        self.cursor.skip_newlines();
        self.expect(&TokenKind::RParen)?;
        let span = self.span_from(start);
        Ok(self.alloc_expr(Expr::new(kind, span)))
    }

    fn parse_seq_body(&mut self, close: &TokenKind) -> Result<SeqBody, ParseError> {
        self.cursor.skip_newlines();
        if self.check(close) {
            return Ok(SeqBody::Items(Vec::new()));
        }
        if self.check(&TokenKind::For) {
            return Ok(SeqBody::Comprehension(Box::new(self.parse_comprehension(None)?)));
        }
        let first = self.parse_expr()?;
        self.cursor.skip_newlines();
        if self.check(&TokenKind::For) {
            return Ok(SeqBody::Comprehension(Box::new(
                self.parse_comprehension(Some(first))?,
            )));
        }
        Ok(SeqBody::Items(self.parse_more_items(first, close)?))
    }

    /// Remaining `, item` entries after `first`; allows a trailing comma.
    fn parse_more_items(&mut self, first: ExprId, close: &TokenKind) -> Result<Vec<ExprId>, ParseError> {
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            self.cursor.skip_newlines();
            if self.check(close) {
                break;
            }
            items.push(self.parse_expr()?);
            self.cursor.skip_newlines();
        }
        Ok(items)
    }

    fn parse_map_body(&mut self, close: &TokenKind) -> Result<MapBody, ParseError> {
        self.cursor.skip_newlines();
        if self.check(close) {
            return Ok(MapBody::Items(Vec::new()));
        }
        if self.check(&TokenKind::For) {
            return Ok(MapBody::Comprehension(Box::new(self.parse_comprehension(None)?)));
        }
        let first = self.parse_map_item()?;
        self.cursor.skip_newlines();
        if self.check(&TokenKind::For) {
            return Ok(MapBody::Comprehension(Box::new(
                self.parse_comprehension(Some(first))?,
            )));
        }
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            self.cursor.skip_newlines();
            if self.check(close) {
                break;
            }
            items.push(self.parse_map_item()?);
            self.cursor.skip_newlines();
        }
        Ok(MapBody::Items(items))
    }

    fn parse_map_item(&mut self) -> Result<(ExprId, ExprId), ParseError> {
        let key = self.parse_expr()?;
        self.cursor.skip_newlines();
        self.expect(&TokenKind::Colon)?;
        self.cursor.skip_newlines();
        let value = self.parse_expr()?;
        Ok((key, value))
    }

    /// `for target in iter [if cond]`, with the element parsed by the caller.
    fn parse_comprehension<E>(&mut self, element: Option<E>) -> Result<Comprehension<E>, ParseError> {
        self.expect(&TokenKind::For)?;
        let target = self.parse_target_list()?;
        self.expect(&TokenKind::In)?;
        self.cursor.skip_newlines();
        let iter = self.parse_or()?;
        self.cursor.skip_newlines();
        let cond = if self.eat(&TokenKind::If) {
            self.cursor.skip_newlines();
            Some(self.parse_or()?)
        } else {
            None
        };
        Ok(Comprehension {
            element,
            target,
            iter,
            cond,
        })
    }
}
