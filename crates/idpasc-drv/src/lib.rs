//! idpasc-drv - Compiler Driver
//!
//! ============================================================================
//! COMPILER DRIVER OVERVIEW
//! ============================================================================
//!
//! Driver adalah entry point dan orchestrator untuk front-end compilation
//! pipeline. Driver bertanggung jawab untuk:
//!
//! 1. COMMAND LINE PARSING
//!    - Parse the single source-file argument
//!
//! 2. FILE MANAGEMENT
//!    - Read the source file as UTF-8 text
//!
//! 3. PIPELINE ORCHESTRATION
//!    - Run lexing, parsing, and semantic analysis in order
//!
//! 4. REPORTING
//!    - Print tokens, parse tree, decorated AST, and symbol tables
//!    - Print every collected diagnostic
//!    - Exit with the appropriate code
//!
//! ============================================================================
//! COMPILATION PIPELINE
//! ============================================================================
//!
//! ```text
//! Source file (.idp)
//!        │
//!        ▼
//!   [Read File]
//!        │
//!        ▼
//!   [Lexer]    (idpasc-lex) ──▶ Token stream
//!        │
//!        ▼
//!   [Parser]   (idpasc-par) ──▶ Parse tree
//!        │
//!        ▼
//!   [Semantic Analysis] (idpasc-sem) ──▶ Decorated AST + symbol tables
//! ```
//!
//! PHASES DETAIL:
//! --------------
//!
//! Phase 1: Lexical Analysis
//! - Input: Source code (text)
//! - Output: Token stream
//! - Tool: idpasc-lex
//! - Errors: non-fatal lex warnings, collected and reported at the end
//!
//! Phase 2: Parsing
//! - Input: Token stream
//! - Output: Parse tree
//! - Tool: idpasc-par
//! - Errors: a syntax error is fatal — parsing stops at the first one
//!
//! Phase 3: Semantic Analysis
//! - Input: Parse tree
//! - Output: Decorated AST, the triple symbol table (tab/btab/atab)
//! - Tool: idpasc-sem
//! - Errors: collected in a list; the walk never aborts on one
//!
//! ============================================================================
//! COMMAND LINE INTERFACE
//! ============================================================================
//!
//! USAGE:
//!
//!   idpasc main.idp
//!
//! There are no optimization levels, emit selectors, or target triples —
//! this driver has exactly one job: run the three front-end phases over one
//! file and print everything each phase produced.
//!
//! ============================================================================
//! ERROR HANDLING
//! ============================================================================
//!
//! Exit Codes:
//! -----------
//! - 0: Success (includes a program with reported semantic errors — those
//!      are diagnostics about the input, not driver failures)
//! - 1: The source file could not be read, or a syntax error stopped
//!      parsing before semantic analysis could run

use std::fmt;
use std::path::PathBuf;

use idpasc_lex::{Lexer, Token};
use idpasc_par::{ParseNode, SyntaxError};
use idpasc_sem::{analyze, AnalysisOutput};
use idpasc_util::{Diagnostic, Handler};

pub mod report;

/// Driver configuration: which file to compile. `idpasc <source-file>` is
/// the entire surface — there is no `-o`, no optimization flags, no
/// `--emit` selector.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_file: PathBuf,
}

impl Config {
    /// Parse `idpasc <source-file>` from raw process arguments (excluding
    /// argv[0]).
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, CompileError> {
        let mut args = args.into_iter();
        let source_file = args.next().ok_or(CompileError::MissingSourceFile)?;
        if let Some(extra) = args.next() {
            return Err(CompileError::InvalidArguments(format!(
                "unexpected argument '{extra}'"
            )));
        }
        Ok(Config { source_file: PathBuf::from(source_file) })
    }
}

/// One compiler invocation over a single source file.
pub struct Session {
    pub config: Config,
    pub handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, handler: Handler::new() }
    }

    /// Run the full pipeline. A syntax error is fatal and returned as `Err`;
    /// semantic errors are not — they are carried inside the returned
    /// [`CompilationReport`] for the caller to print and exit 0 regardless.
    pub fn compile(&mut self) -> Result<CompilationReport, CompileError> {
        let source = std::fs::read_to_string(&self.config.source_file)
            .map_err(|e| CompileError::Io(self.config.source_file.clone(), e))?;

        let tokens = Lexer::tokenize(&source, &self.handler);
        let lex_diagnostics = self.handler.diagnostics();

        let tree = idpasc_par::parse(tokens.clone()).map_err(CompileError::Syntax)?;

        let analysis = analyze(&tree);

        Ok(CompilationReport { tokens, tree, analysis, lex_diagnostics })
    }
}

/// Everything the three phases produced for one source file.
pub struct CompilationReport {
    pub tokens: Vec<Token>,
    pub tree: ParseNode,
    pub analysis: AnalysisOutput,
    pub lex_diagnostics: Vec<Diagnostic>,
}

impl CompilationReport {
    pub fn has_semantic_errors(&self) -> bool {
        !self.analysis.errors.is_empty()
    }
}

/// Compile error
#[derive(Debug)]
pub enum CompileError {
    MissingSourceFile,
    InvalidArguments(String),
    Io(PathBuf, std::io::Error),
    Syntax(SyntaxError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::MissingSourceFile => write!(f, "usage: idpasc <source-file>"),
            CompileError::InvalidArguments(s) => write!(f, "invalid arguments: {s}"),
            CompileError::Io(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            CompileError::Syntax(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CompileError {}

/// Entry point invoked by `main`: parse arguments, run the pipeline, print
/// every stage, and return the driver's own result (I/O and syntax errors
/// only — semantic errors are printed but do not make this `Err`).
pub fn main() -> Result<(), CompileError> {
    let config = Config::from_args(std::env::args().skip(1))?;
    let mut session = Session::new(config);
    let report = session.compile()?;

    report::print_tokens(&report.tokens);
    report::print_parse_tree(&report.tree);
    report::print_ast(&report.analysis.ast);
    report::print_symbol_tables(&report.analysis.table);
    report::print_diagnostics(&report.lex_diagnostics, &report.analysis.errors);

    Ok(())
}
