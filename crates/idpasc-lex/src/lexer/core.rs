//! Core lexer: cursor-driven dispatch implementing the rule cascade in §4.1
//! (whitespace, comments, multi-char operators, strings, identifiers,
//! numbers, single-char punctuation, unknown glyphs).
//!
//! `Lexer::tokenize` is a pure function of the input string — it owns no
//! state beyond the cursor and collects diagnostics into the caller-supplied
//! [`Handler`] rather than mutating any global table.

use idpasc_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexical analyzer. Consumes source text and emits tokens on demand via
/// [`Lexer::next_token`], or all at once via [`Lexer::tokenize`].
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
    pub(crate) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Tokenize `source` in full, returning every token up to but not
    /// including the terminal `Eof` sentinel.
    pub fn tokenize(source: &str, handler: &Handler) -> Vec<Token> {
        let mut lexer = Lexer::new(source, handler);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                break;
            }
            tokens.push(tok);
        }
        tokens
    }

    /// Produce the next token, skipping whitespace and comments first.
    ///
    /// Priority order (§4.1):
    /// 1. whitespace
    /// 2. comments (`{ … }`, `(* … *)`)
    /// 3. longest-match multi-character punctuation
    /// 4. string literal
    /// 5. identifier/keyword/word-operator
    /// 6. number
    /// 7. single-character operator/punctuation
    /// 8. unknown glyph
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::eof(self.cursor.line(), self.cursor.column());
        }

        let c = self.cursor.current_char();

        if c == '\'' {
            return self.lex_string();
        }

        if crate::unicode::is_ident_start(c) {
            return self.lex_identifier();
        }

        if crate::unicode::is_digit(c) {
            return self.lex_number();
        }

        if let Some(tok) = self.lex_multi_char_operator() {
            return tok;
        }

        if let Some(kind) = crate::token::classify_single_char(c) {
            self.cursor.advance();
            return self.make_token(kind);
        }

        self.cursor.advance();
        self.report_warning(
            DiagnosticCode::W_LEX_UNKNOWN_GLYPH,
            format!("unknown glyph '{}'", c),
        );
        self.make_token(TokenKind::Unknown)
    }

    /// Skip whitespace and both comment syntaxes, repeatedly, until neither
    /// applies — a comment can be immediately followed by more whitespace
    /// or another comment.
    fn skip_trivia(&mut self) {
        loop {
            let before = self.cursor.position();
            self.cursor.skip_whitespace();

            if self.cursor.current_char() == '{' {
                self.skip_brace_comment();
                continue;
            }
            if self.cursor.current_char() == '(' && self.cursor.peek_char(1) == '*' {
                self.skip_paren_star_comment();
                continue;
            }

            if self.cursor.position() == before {
                break;
            }
        }
    }

    /// Build a token from `token_start`..current cursor position.
    pub(crate) fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = self.cursor.slice_from(self.token_start).to_string();
        Token::new(kind, lexeme, self.token_start_line, self.token_start_column)
    }

    pub(crate) fn current_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    pub(crate) fn report_error(&self, code: DiagnosticCode, message: impl Into<String>) {
        DiagnosticBuilder::error(message)
            .code(code)
            .span(self.current_span())
            .emit(self.handler);
    }

    pub(crate) fn report_warning(&self, code: DiagnosticCode, message: impl Into<String>) {
        DiagnosticBuilder::warning(message)
            .code(code)
            .span(self.current_span())
            .emit(self.handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        Lexer::tokenize(source, &handler)
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn whitespace_only_yields_no_tokens() {
        assert!(tokenize("   \n\t\n  ").is_empty());
    }

    #[test]
    fn minimal_program_tokenizes() {
        let toks = tokenize("program p; mulai selesai.");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Keyword,
                TokenKind::Keyword,
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn lexemes_round_trip_minus_trivia() {
        let source = "program  p ;\nmulai selesai .";
        let toks = tokenize(source);
        let joined: String = toks.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(joined, "programpmulaiselesai.");
    }

    #[test]
    fn unknown_glyph_is_reported_and_tokenized() {
        let handler = Handler::new();
        let toks = Lexer::tokenize("program p; mulai x := 1 # selesai.", &handler);
        assert!(toks.iter().any(|t| t.kind == TokenKind::Unknown && t.lexeme == "#"));
        assert!(handler.warning_count() > 0);
    }
}
