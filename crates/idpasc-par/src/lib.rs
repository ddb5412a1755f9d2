//! Recursive-descent parser over the Indonesian-keyword Pascal-like
//! grammar: `parse(tokens) -> ParseNode` for the start symbol `<program>`.
//!
//! The parser is a thin cursor over a flat `Vec<Token>` with up to
//! two-token lookahead. It fails fatally on the first unrecoverable
//! mismatch — there is no error recovery, matching the propagation policy
//! that only the semantic analyzer accumulates diagnostics. Backtracking is
//! confined to the three ambiguity points named in the module docs of
//! [`types`], [`stmt`] and [`types::parse_index_spec`].

pub mod ast;
pub mod expr;
pub mod items;
pub mod stmt;
pub mod types;

pub use ast::{NonTerminal, ParseNode};

use idpasc_lex::{Token, TokenKind};

/// A fatal syntax error: the first grammar mismatch the parser could not
/// work around. Carries the offending token's position per §4.2.
#[derive(Debug, thiserror::Error)]
#[error("Syntax error at line {line}, column {column}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Recursive-descent parser. Owns the full token stream; holds only a
/// cursor position — no mutable global state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let (eof_line, eof_column) = tokens
            .last()
            .map(|t| (t.line, t.column + t.lexeme.chars().count() as u32))
            .unwrap_or((1, 1));
        Self {
            tokens,
            pos: 0,
            eof: Token::eof(eof_line, eof_column),
        }
    }

    /// Parse the whole token stream as a `<program>`.
    pub fn parse(&mut self) -> ParseResult<ParseNode> {
        items::parse_program(self)
    }

    pub(crate) fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Look `k` tokens ahead of `current()`; `lookahead(0) == current()`.
    pub(crate) fn lookahead(&self, k: usize) -> &Token {
        self.tokens.get(self.pos + k).unwrap_or(&self.eof)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consume and return the current token as a leaf parse node.
    pub(crate) fn bump(&mut self) -> ParseNode {
        let tok = self.current().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        ParseNode::leaf(tok)
    }

    pub(crate) fn mark(&self) -> usize {
        self.pos
    }

    pub(crate) fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn check_keyword(&self, word: &str) -> bool {
        self.current().is_keyword(word)
    }

    /// Consume the current token if its kind matches; otherwise `None`,
    /// consuming nothing.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> Option<ParseNode> {
        if self.check(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> ParseResult<ParseNode> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!("expected {:?}", kind)))
        }
    }

    /// Case-insensitive keyword match, per §4.1 rule 5.
    pub(crate) fn expect_keyword(&mut self, word: &str) -> ParseResult<ParseNode> {
        if self.check_keyword(word) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!("expected keyword '{}'", word)))
        }
    }

    /// Expect a `RELATIONAL_OPERATOR`/`ARITHMETIC_OPERATOR`-class token with
    /// one of the given exact lexemes (case-sensitive — operators are
    /// symbols, not identifiers).
    pub(crate) fn expect_one_of(
        &mut self,
        kind: TokenKind,
        lexemes: &[&str],
    ) -> ParseResult<ParseNode> {
        if self.check(kind) && lexemes.iter().any(|l| *l == self.current().lexeme) {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!("expected one of {:?}", lexemes)))
        }
    }

    pub(crate) fn error_here(&self, message: impl Into<String>) -> SyntaxError {
        let tok = self.current();
        SyntaxError {
            message: message.into(),
            kind: tok.kind,
            lexeme: tok.lexeme.clone(),
            line: tok.line,
            column: tok.column,
        }
    }

}

/// Parse a full token stream. Convenience wrapper around [`Parser::parse`].
pub fn parse(tokens: Vec<Token>) -> ParseResult<ParseNode> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use idpasc_lex::Lexer;
    use idpasc_util::Handler;

    fn parse_source(source: &str) -> ParseResult<ParseNode> {
        let handler = Handler::new();
        let tokens = Lexer::tokenize(source, &handler);
        parse(tokens)
    }

    #[test]
    fn minimal_program_parses() {
        let tree = parse_source("program p; mulai selesai.").unwrap();
        assert_eq!(tree.kind, NonTerminal::Program);
    }

    #[test]
    fn round_trip_leaf_tokens_reproduce_source_lexemes() {
        let source = "program p; mulai selesai.";
        let handler = Handler::new();
        let tokens = Lexer::tokenize(source, &handler);
        let tree = parse(tokens.clone()).unwrap();
        let leaves = tree.leaf_tokens();
        assert_eq!(leaves.len(), tokens.len());
        for (leaf, tok) in leaves.iter().zip(tokens.iter()) {
            assert_eq!(leaf.lexeme, tok.lexeme);
        }
    }

    #[test]
    fn missing_terminating_dot_is_a_syntax_error() {
        let err = parse_source("program p; mulai selesai").unwrap_err();
        assert_eq!(err.kind, idpasc_lex::TokenKind::Eof);
    }

    #[test]
    fn missing_program_keyword_is_a_syntax_error() {
        let err = parse_source("p; mulai selesai.").unwrap_err();
        assert!(err.message.contains("program"));
    }
}
