//! Token kinds, classification tables, and the [`Token`] value itself.
//!
//! The lexer never invents vocabulary beyond what is listed here — every
//! reserved word, word-operator, and symbolic operator the grammar in the
//! parser crate refers to is enumerated in this module's tables, so lexer
//! and parser agree on the surface language by construction.

use idpasc_util::Symbol;

/// The category of a [`Token`].
///
/// Mirrors the token kind set of the source-language grammar: keywords,
/// word- and symbol-operators, literals, and single/multi-character
/// punctuation. `Eof` is a lexer-internal sentinel (not part of the
/// grammar's terminal alphabet) that lets the parser detect end of input
/// without special-casing `Option<Token>` at every call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A reserved word, e.g. `program`, `variabel`, `jika`.
    Keyword,
    /// A word-spelled logical operator: `dan`, `atau`, `tidak`.
    LogicalOperator,
    /// A user-defined identifier.
    Identifier,
    /// An integer or real numeric literal (`123`, `3.14`).
    Number,
    /// A character literal, `'x'` — only ever produced by re-classification;
    /// see [`crate::lexer::Lexer`] module docs.
    CharLiteral,
    /// A string literal delimited by `'…'`.
    StringLiteral,
    /// `+ - * / bagi mod`.
    ArithmeticOperator,
    /// `= <> < <= > >=`.
    RelationalOperator,
    /// `:=`.
    AssignOperator,
    Semicolon,
    Comma,
    Colon,
    Dot,
    LParenthesis,
    RParenthesis,
    LBracket,
    RBracket,
    /// `..`; see [`crate::lexer::Lexer`] module docs for why two
    /// consecutive `.` tokens are never merged into one.
    RangeOperator,
    /// An unrecognized glyph; the lexer has already emitted a warning.
    Unknown,
    /// End of input. Never appears in the surface grammar.
    Eof,
}

/// A single lexical unit: its classification, the verbatim source slice it
/// came from, and its 1-based source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenKind::Eof, "", line, column)
    }

    /// Case-insensitive comparison of `lexeme` against a reserved word.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme.eq_ignore_ascii_case(word)
    }

    /// The interned form of `lexeme`, for symbol-table insertion.
    pub fn symbol(&self) -> Symbol {
        Symbol::intern(&self.lexeme)
    }
}

/// Reserved words of the surface language, in the canonical order the
/// symbol table's reserved prefix expects (see
/// `idpasc_util::symbol::RESERVED_SYMBOLS_END` and
/// `idpasc_sem::scope::SymbolTable::USER_ID_START`).
///
/// `selainitu` (one word) is the canonical spelling for the else-keyword;
/// the hyphenated `selain-itu` variant some source dialects accept is
/// deliberately rejected here and falls through to `Identifier`/`Unknown`
/// classification (see the REDESIGN note in the parser crate).
pub const KEYWORDS: &[&str] = &[
    "integer", "real", "boolean", "char", "string",
    "program", "variabel", "mulai", "selesai", "jika", "maka", "selainitu",
    "selama", "lakukan", "untuk", "ke", "turunke", "larik", "dari",
    "prosedur", "fungsi", "konstanta", "tipe", "kasus", "rekaman",
    "ulangi", "sampai",
    "writeln", "readln", "write", "read",
];

/// Word-spelled logical operators (`dan`, `atau`, `tidak`) — lex as
/// `LogicalOperator`, not `Keyword`, so the parser's operator-precedence
/// tables can treat them uniformly with the symbolic operators.
pub const WORD_LOGICAL_OPERATORS: &[&str] = &["dan", "atau", "tidak"];

/// Word-spelled arithmetic operators (`bagi` = integer division, `mod` =
/// remainder) — lex as `ArithmeticOperator`.
pub const WORD_ARITHMETIC_OPERATORS: &[&str] = &["bagi", "mod"];

/// Boolean literals. These are ordinary identifiers lexically (lowercase
/// word, not a listed keyword) but are recognized as literals by the
/// parser's `<factor>` production; listed here only for documentation.
pub const BOOLEAN_LITERALS: &[&str] = &["benar", "salah"];

/// Classify a lexed identifier-shaped word into its final token kind.
///
/// Matching is case-insensitive (the lexeme stored on the token is always
/// the verbatim source text, never lowercased).
pub fn classify_word(text: &str) -> TokenKind {
    let lower = text.to_ascii_lowercase();
    if KEYWORDS.iter().any(|k| *k == lower) {
        TokenKind::Keyword
    } else if WORD_LOGICAL_OPERATORS.iter().any(|k| *k == lower) {
        TokenKind::LogicalOperator
    } else if WORD_ARITHMETIC_OPERATORS.iter().any(|k| *k == lower) {
        TokenKind::ArithmeticOperator
    } else {
        TokenKind::Identifier
    }
}

/// Longest-match multi-character punctuation, checked before any
/// single-character fallback. Order matters only in that every entry here
/// must be tried before the single-character table; entries are otherwise
/// independent since no two share the same prefix-of-equal-length.
pub const MULTI_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("(*", TokenKind::Unknown), // comment open, handled by the comment scanner directly
    ("*)", TokenKind::Unknown), // comment close, never reached as a standalone token
    (":=", TokenKind::AssignOperator),
    ("..", TokenKind::RangeOperator),
    ("<=", TokenKind::RelationalOperator),
    (">=", TokenKind::RelationalOperator),
    ("<>", TokenKind::RelationalOperator),
];

/// Classify a single-character symbol once no multi-character match applied.
pub fn classify_single_char(c: char) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match c {
        '+' | '-' | '*' | '/' => ArithmeticOperator,
        '=' | '<' | '>' => RelationalOperator,
        ';' => Semicolon,
        ',' => Comma,
        ':' => Colon,
        '.' => Dot,
        '(' => LParenthesis,
        ')' => RParenthesis,
        '[' => LBracket,
        ']' => RBracket,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_classify_case_insensitively() {
        assert_eq!(classify_word("JIKA"), TokenKind::Keyword);
        assert_eq!(classify_word("Jika"), TokenKind::Keyword);
        assert_eq!(classify_word("jika"), TokenKind::Keyword);
    }

    #[test]
    fn word_operators_classify_distinctly() {
        assert_eq!(classify_word("dan"), TokenKind::LogicalOperator);
        assert_eq!(classify_word("atau"), TokenKind::LogicalOperator);
        assert_eq!(classify_word("tidak"), TokenKind::LogicalOperator);
        assert_eq!(classify_word("bagi"), TokenKind::ArithmeticOperator);
        assert_eq!(classify_word("mod"), TokenKind::ArithmeticOperator);
    }

    #[test]
    fn unrecognized_word_is_identifier() {
        assert_eq!(classify_word("hasil_total"), TokenKind::Identifier);
        assert_eq!(classify_word("benar"), TokenKind::Identifier);
        assert_eq!(classify_word("selain-itu"), TokenKind::Identifier);
    }

    #[test]
    fn single_char_classification_covers_punctuation() {
        assert_eq!(classify_single_char(';'), Some(TokenKind::Semicolon));
        assert_eq!(classify_single_char('['), Some(TokenKind::LBracket));
        assert_eq!(classify_single_char('@'), None);
    }
}
