//! Core error types for the idpasc-util crate.

use thiserror::Error;

/// Error type for source map operations.
#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },

    #[error("Span out of bounds: file has {file_len} bytes, span is {span_start}..{span_end}")]
    SpanOutOfBounds {
        file_len: usize,
        span_start: usize,
        span_end: usize,
    },
}

/// Error type for index vector operations.
#[derive(Debug, Error)]
pub enum IndexVecError {
    #[error("Index out of bounds: index {index}, length {length}")]
    OutOfBounds { index: usize, length: usize },
}

pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;
pub type IndexVecResult<T> = std::result::Result<T, IndexVecError>;
