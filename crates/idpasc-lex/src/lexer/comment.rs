//! Comment skipping: the two comment syntaxes `{ … }` and `(* … *)`.
//!
//! Neither syntax nests — the first matching closer ends the comment,
//! matching Wirth-style Pascal dialects. An unterminated comment emits a
//! warning and stops at end of input; line/column tracking continues
//! through embedded newlines via [`crate::cursor::Cursor::advance`].

use idpasc_util::DiagnosticCode;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    /// Skip a `{ … }` comment. Assumes the cursor is on the opening `{`.
    pub(crate) fn skip_brace_comment(&mut self) {
        self.cursor.advance(); // consume '{'
        loop {
            if self.cursor.is_at_end() {
                self.report_warning(
                    DiagnosticCode::W_LEX_UNTERMINATED_COMMENT,
                    "unterminated comment",
                );
                return;
            }
            if self.cursor.current_char() == '}' {
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }

    /// Skip a `(* … *)` comment. Assumes the cursor is on the opening `(*`.
    pub(crate) fn skip_paren_star_comment(&mut self) {
        self.cursor.advance(); // consume '('
        self.cursor.advance(); // consume '*'
        loop {
            if self.cursor.is_at_end() {
                self.report_warning(
                    DiagnosticCode::W_LEX_UNTERMINATED_COMMENT,
                    "unterminated comment",
                );
                return;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == ')' {
                self.cursor.advance();
                self.cursor.advance();
                return;
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
    fn brace_comment_is_skipped() {
        let toks = tokenize("x { this is a comment } := 1");
        assert_eq!(toks[0].kind, TokenKind::Identifier);
        assert_eq!(toks[1].kind, TokenKind::AssignOperator);
    }

    #[test]
    fn paren_star_comment_is_skipped() {
        let toks = tokenize("x (* comment *) := 1");
        assert_eq!(toks[1].kind, TokenKind::AssignOperator);
    }

    #[test]
    fn comment_spanning_lines_updates_line_tracking() {
        let toks = tokenize("x { line one\nline two } := 1");
        assert_eq!(toks[1].line, 2);
    }

    #[test]
    fn unterminated_brace_comment_warns_and_stops() {
        let handler = Handler::new();
        let toks = Lexer::tokenize("x { never closed", &handler);
        assert_eq!(toks.len(), 1);
        assert!(handler.warning_count() > 0);
    }

    #[test]
    fn unterminated_paren_star_comment_warns_and_stops() {
        let handler = Handler::new();
        let toks = Lexer::tokenize("x (* never closed", &handler);
        assert_eq!(toks.len(), 1);
        assert!(handler.warning_count() > 0);
    }
}
