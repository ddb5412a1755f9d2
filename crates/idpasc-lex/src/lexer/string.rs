//! String literals: `'…'`, with `''` as the escape for a literal quote
//! inside the string (Pascal-style, not backslash-escaped).
//!
//! The lexer always emits `TokenKind::StringLiteral`, even for a
//! single-character string like `'x'` — re-classifying a one-character
//! string literal as `CharLiteral` is left to a later consumer that has
//! enough context to know whether a char or a string is expected.

use idpasc_util::DiagnosticCode;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn lex_string(&mut self) -> crate::token::Token {
        self.cursor.advance(); // consume opening '\''
        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                self.report_warning(
                    DiagnosticCode::W_LEX_UNTERMINATED_STRING,
                    "unterminated string literal",
                );
                return self.make_token(crate::token::TokenKind::StringLiteral);
            }
            if self.cursor.current_char() == '\'' {
                if self.cursor.peek_char(1) == '\'' {
                    self.cursor.advance();
                    self.cursor.advance();
                    continue;
                }
                self.cursor.advance(); // consume closing '\''
                return self.make_token(crate::token::TokenKind::StringLiteral);
            }
            self.cursor.advance();
        }
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
    fn simple_string_literal() {
        let toks = tokenize("'halo dunia'");
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].lexeme, "'halo dunia'");
    }

    #[test]
    fn single_char_string_still_lexes_as_string() {
        let toks = tokenize("'x'");
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].lexeme, "'x'");
    }

    #[test]
    fn doubled_quote_escapes_a_literal_quote() {
        let toks = tokenize("'it''s'");
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].lexeme, "'it''s'");
    }

    #[test]
    fn unterminated_string_warns_and_consumes_rest_of_input() {
        let handler = Handler::new();
        let toks = Lexer::tokenize("'never closed", &handler);
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert!(handler.warning_count() > 0);
    }

    #[test]
    fn unterminated_string_stops_at_an_embedded_newline() {
        let handler = Handler::new();
        let toks = Lexer::tokenize("'never closed\nberikutnya", &handler);
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].lexeme, "'never closed");
        assert!(handler.warning_count() > 0);
        // Lexing resumes after the newline instead of swallowing it into the string.
        assert_eq!(toks[1].kind, TokenKind::Identifier);
        assert_eq!(toks[1].lexeme, "berikutnya");
    }

    #[test]
    fn empty_string_literal() {
        let toks = tokenize("''");
        assert_eq!(toks[0].lexeme, "''");
    }
}
