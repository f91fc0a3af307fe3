//! Token cursor for navigating the token stream.

use lagoon_ir::Span;
use lagoon_lexer::{Token, TokenKind, TokenList};

/// Position in a [`TokenList`]. The list always ends with `Eof`, and the
/// cursor never moves past it.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        match self.pos {
            0 => Span::DUMMY,
            pos => self.tokens[pos - 1].span,
        }
    }

    /// Kind of the token after the current one.
    pub fn peek_next_kind(&self) -> &'a TokenKind {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + 1).min(last)].kind
    }

    /// Kind of the first token at or after the current one that is not a newline.
    pub fn peek_past_newlines(&self) -> &'a TokenKind {
        self.tokens[self.pos..]
            .iter()
            .map(|t| &t.kind)
            .find(|k| **k != TokenKind::Newline)
            .unwrap_or(&TokenKind::Eof)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// No whitespace between the previous token and the current one.
    #[inline]
    pub fn touches_previous(&self) -> bool {
        self.pos > 0 && self.previous_span().end == self.current_span().start
    }

    /// Advance and return the consumed token.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    pub fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }
}
