//! Identifiers, keywords, and word-spelled operators.
//!
//! All three share one lexical shape — `[A-Za-z_][A-Za-z0-9_]*` — so they
//! are scanned by a single routine and disambiguated afterwards by
//! [`crate::token::classify_word`].

use crate::unicode::is_ident_continue;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_identifier(&mut self) -> crate::token::Token {
        while !self.cursor.is_at_end() && is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        // Boolean literals (`benar`/`salah`) lex as plain identifiers; the
        // parser's <factor> production recognizes them by lexeme.
        let kind = crate::token::classify_word(self.cursor.slice_from(self.token_start));
        self.make_token(kind)
    }
}
