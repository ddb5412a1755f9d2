//! Lexical analyzer: turns source text into a token stream per the §4.1
//! rule cascade.
//!
//! The public surface is small: [`lexer::Lexer`] does the work, [`token`]
//! defines what it produces, [`cursor::Cursor`] is the UTF-8-aware character
//! source it scans, and [`unicode`] holds the ASCII character-class
//! predicates the grammar's identifier/digit rules reduce to.

pub mod cursor;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
