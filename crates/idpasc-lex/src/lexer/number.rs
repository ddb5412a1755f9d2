//! Numeric literals: `INTEGER` and `REAL`, both lexed as a single
//! `TokenKind::Number` — the distinction is made later by the semantic
//! analyzer from the lexeme's shape (presence of a `.`).
//!
//! The fractional part is only consumed when a `.` is immediately followed
//! by a digit. A trailing `.` that isn't (e.g. the statement terminator in
//! `x := 1.`, or the first half of a `..` range in `1..10`) is left for the
//! next call to `next_token` to classify on its own.

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_number(&mut self) -> crate::token::Token {
        while !self.cursor.is_at_end() && crate::unicode::is_digit(self.cursor.current_char()) {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.'
            && crate::unicode::is_digit(self.cursor.peek_char(1))
        {
            self.cursor.advance(); // consume '.'
            while !self.cursor.is_at_end() && crate::unicode::is_digit(self.cursor.current_char())
            {
                self.cursor.advance();
            }
        }

        self.make_token(crate::token::TokenKind::Number)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;
    use idpasc_util::Handler;

    fn tokenize(source: &str) -> Vec<crate::token::Token> {
        let handler = Handler::new();
        Lexer::tokenize(source, &handler)
    }

    #[test]
    fn integer_literal() {
        let toks = tokenize("123");
        assert_eq!(toks[0].kind, TokenKind::Number);
        assert_eq!(toks[0].lexeme, "123");
    }

    #[test]
    fn real_literal() {
        let toks = tokenize("3.14");
        assert_eq!(toks[0].kind, TokenKind::Number);
        assert_eq!(toks[0].lexeme, "3.14");
    }

    #[test]
    fn trailing_dot_not_followed_by_digit_is_not_consumed() {
        let toks = tokenize("1.");
        assert_eq!(toks[0].kind, TokenKind::Number);
        assert_eq!(toks[0].lexeme, "1");
        assert_eq!(toks[1].kind, TokenKind::Dot);
    }

    #[test]
    fn range_after_integer_is_not_swallowed_as_a_real() {
        let toks = tokenize("1..10");
        assert_eq!(toks[0].lexeme, "1");
        assert_eq!(toks[1].kind, TokenKind::RangeOperator);
        assert_eq!(toks[2].lexeme, "10");
    }
}
