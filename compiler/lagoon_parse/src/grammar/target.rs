//! Assignment targets.
//!
//! Targets are parsed as ordinary expressions first and converted
//! afterwards, so `a.b[0], c = ...` needs no lookahead.

use lagoon_ir::{CollectionKind, ExprId, ExprKind, SeqBody, Span, Target};
use lagoon_lexer::TokenKind;

use crate::{ErrorContext, ParseError, Parser};

impl Parser<'_> {
    /// Targets of `for` loops and comprehensions: chains separated by commas.
    pub(crate) fn parse_target_list(&mut self) -> Result<Target, ParseError> {
        let start = self.current_span();
        let mut exprs = vec![self.parse_postfix()?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_postfix()?);
        }
        self.exprs_to_target(&exprs, self.span_from(start))
    }

    pub(crate) fn exprs_to_target(&self, exprs: &[ExprId], span: Span) -> Result<Target, ParseError> {
        match exprs {
            [single] => self.expr_to_target(*single),
            many => Ok(Target::Tuple {
                elements: many
                    .iter()
                    .map(|id| self.expr_to_target(*id))
                    .collect::<Result<_, _>>()?,
                span,
            }),
        }
    }

    fn expr_to_target(&self, id: ExprId) -> Result<Target, ParseError> {
        let expr = self.arena.expr(id);
        match &expr.kind {
            ExprKind::Name(name) => Ok(Target::Name {
                name: name.clone(),
                span: expr.span,
            }),
            ExprKind::Attr { receiver, name } => Ok(Target::Attr {
                receiver: *receiver,
                name: name.clone(),
                span: expr.span,
            }),
            ExprKind::Index { receiver, key } => Ok(Target::Index {
                receiver: *receiver,
                key: *key,
                span: expr.span,
            }),
            ExprKind::Collection {
                kind: CollectionKind::Tuple | CollectionKind::List,
                body: SeqBody::Items(items),
            } => Ok(Target::Tuple {
                elements: items
                    .iter()
                    .map(|item| self.expr_to_target(*item))
                    .collect::<Result<_, _>>()?,
                span: expr.span,
            }),
            _ => Err(ParseError::new("cannot assign to this expression", expr.span)
                .in_context(ErrorContext::AssignTarget)),
        }
    }
}
