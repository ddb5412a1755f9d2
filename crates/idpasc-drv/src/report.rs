//! Plain-text dumps of each pipeline stage. Pretty-printing lives here,
//! in the driver, rather than in any of the three phase crates — none of
//! them know or care how their output gets displayed.

use idpasc_lex::Token;
use idpasc_par::ParseNode;
use idpasc_sem::hir::Program;
use idpasc_sem::SymbolTable;
use idpasc_util::{Diagnostic, Idx};

pub fn print_tokens(tokens: &[Token]) {
    println!("=== Tokens ===");
    for token in tokens {
        println!(
            "{:>4}:{:<4} {:<18?} {:?}",
            token.line, token.column, token.kind, token.lexeme
        );
    }
    println!();
}

pub fn print_parse_tree(tree: &ParseNode) {
    println!("=== Parse Tree ===");
    print_node(tree, 0);
    println!();
}

fn print_node(node: &ParseNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.token {
        Some(tok) => println!("{indent}{:?} '{}'", node.kind, tok.lexeme),
        None => println!("{indent}{:?}", node.kind),
    }
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

pub fn print_ast(program: &Program) {
    println!("=== Decorated AST ===");
    println!("{program:#?}");
    println!();
}

pub fn print_symbol_tables(table: &SymbolTable) {
    println!("=== Symbol Table: tab ===");
    println!(
        "{:>4}  {:<16}{:<10}{:<9}{:>5}{:>5}{:>8}  link",
        "idx", "name", "obj", "type", "lvl", "adr", "param"
    );
    for (id, entry) in table.tab.iter_enumerated() {
        println!(
            "{:>4}  {:<16}{:<10?}{:<9}{:>5}{:>5}{:>8}  {}",
            id.index(),
            entry.name.as_str(),
            entry.obj,
            entry.data_type,
            entry.level,
            entry.address,
            entry.is_param,
            entry.link,
        );
    }
    println!();

    println!("=== Symbol Table: btab ===");
    println!(
        "{:>4}  {:>6}{:>6}{:>6}{:>8}{:>9}",
        "idx", "last", "lpar", "psze", "vsze", "params"
    );
    for (id, block) in table.btab.iter_enumerated() {
        println!(
            "{:>4}  {:>6}{:>6}{:>6}{:>8}{:>9}",
            id.index(),
            block.last,
            block.lpar,
            block.psze,
            block.vsze,
            block.param_count,
        );
    }
    println!();

    println!("=== Symbol Table: atab ===");
    println!(
        "{:>4}  {:<9}{:<9}{:>5}{:>5}{:>6}{:>6}",
        "idx", "index_ty", "elem_ty", "low", "high", "esz", "size"
    );
    for (id, arr) in table.atab.iter_enumerated() {
        println!(
            "{:>4}  {:<9}{:<9}{:>5}{:>5}{:>6}{:>6}",
            id.index(),
            arr.index_type,
            arr.element_type,
            arr.low,
            arr.high,
            arr.element_size,
            arr.size,
        );
    }
    println!();
}

pub fn print_diagnostics(lex_diagnostics: &[Diagnostic], semantic_errors: &[String]) {
    println!("=== Diagnostics ===");
    if lex_diagnostics.is_empty() && semantic_errors.is_empty() {
        println!("(none)");
        return;
    }
    for diag in lex_diagnostics {
        println!("{}", diag.to_literal_string());
    }
    for error in semantic_errors {
        println!("{error}");
    }
}
