//! Multi-character punctuation: longest-match lookahead over `:=`, `..`,
//! `<=`, `>=`, `<>`. Single-character operators and punctuation are
//! classified directly by [`crate::token::classify_single_char`] in
//! `core::Lexer::next_token`.
//!
//! Always emits a single `RangeOperator` token for `..`; the two-consecutive-
//! DOT fallback some source dialects tolerate is not implemented — callers
//! must write `1..10` with no embedded space to get a range.

use crate::token::{Token, TokenKind};

use super::core::Lexer;

impl<'a> Lexer<'a> {
    /// Try to match one of the two-character operators at the cursor.
    /// Returns `None` (consuming nothing) if no multi-character operator
    /// starts here.
    pub(crate) fn lex_multi_char_operator(&mut self) -> Option<Token> {
        let pair: [char; 2] = [self.cursor.current_char(), self.cursor.peek_char(1)];
        let kind = match pair {
            [':', '='] => TokenKind::AssignOperator,
            ['.', '.'] => TokenKind::RangeOperator,
            ['<', '='] => TokenKind::RelationalOperator,
            ['>', '='] => TokenKind::RelationalOperator,
            ['<', '>'] => TokenKind::RelationalOperator,
            _ => return None,
        };
        self.cursor.advance();
        self.cursor.advance();
        Some(self.make_token(kind))
    }
}
