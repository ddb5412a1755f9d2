//! idpasc-util — shared foundations for the idpasc compiler pipeline.
//!
//! This crate has no knowledge of the Indonesian-keyword grammar itself; it
//! provides the cross-cutting pieces every later phase (lexer, parser,
//! semantic analyzer, driver) needs:
//!
//! - [`symbol`] — string interning, with the reserved-word prefix pre-interned
//!   at fixed indices.
//! - [`span`] — source locations (`Span`, `FileId`) and the multi-file
//!   [`span::SourceMap`].
//! - [`diagnostic`] — the `Handler`/`Diagnostic`/`DiagnosticBuilder` error
//!   model shared by every phase's error list.
//! - [`index_vec`] — a typed, `Idx`-indexed vector used for symbol-table rows
//!   and other growable, never-shrinking tables.
//! - [`def_id`] — a process-wide unique id generator, used where a stable
//!   cross-table handle is needed beyond a single block's indices.

pub mod def_id;
pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use def_id::{DefId, DefIdGenerator};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet};
pub use error::{IndexVecError, IndexVecResult, SourceMapError, SourceMapResult};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
