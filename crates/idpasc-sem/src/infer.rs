//! Compile-time constant-expression folding (§4.4.6).
//!
//! `evaluate_constant_expression` walks a `<simple-expression>`/`<term>`/
//! `<factor>` parse subtree and folds it to an integer when every leaf is
//! either a `NUMBER` literal or a previously declared `CONSTANT` whose
//! value is itself an integer. Used exclusively for array-bound and
//! `for`-loop range folding — it never needs to produce a `REAL`, `CHAR`,
//! or `STRING` result, since none of those are legal array bounds.

use idpasc_par::{NonTerminal, ParseNode};

use crate::scope::SymbolTable;

/// Recursively fold a constant integer expression. Returns `None` ("unknown")
/// on any leaf that is not a literal integer or a folded integer constant —
/// the caller is expected to suppress bounds checking in that case rather
/// than report a spurious error.
pub fn evaluate_constant_expression(node: &ParseNode, table: &SymbolTable) -> Option<i64> {
    match node.kind {
        NonTerminal::Expression | NonTerminal::SimpleExpression => {
            fold_additive(&node.children, table)
        }
        NonTerminal::Term => fold_multiplicative(&node.children, table),
        NonTerminal::Factor => fold_factor(node, table),
        NonTerminal::Terminal => fold_leaf(node, table),
        // A bare identifier reference (no `.field`/`[index]` continuation)
        // parses as a `Variable` wrapping a single leaf, since <factor>
        // routes all IDENT-led alternatives through `parse_variable`.
        NonTerminal::Variable if node.children.len() == 1 && node.children[0].is_leaf() => {
            fold_leaf(&node.children[0], table)
        }
        _ => None,
    }
}

fn fold_additive(children: &[ParseNode], table: &SymbolTable) -> Option<i64> {
    let mut iter = children.iter();
    let mut negate_first = false;
    let mut first = iter.next()?;
    if first.is_leaf() {
        let lexeme = first.token.as_ref().unwrap().lexeme.as_str();
        if lexeme == "+" || lexeme == "-" {
            negate_first = lexeme == "-";
            first = iter.next()?;
        }
    }
    let mut acc = evaluate_constant_expression(first, table)?;
    if negate_first {
        acc = -acc;
    }
    loop {
        let Some(op) = iter.next() else { break };
        let rhs = iter.next()?;
        let rhs_val = evaluate_constant_expression(rhs, table)?;
        let lexeme = op.token.as_ref()?.lexeme.as_str();
        acc = match lexeme {
            "+" => acc.checked_add(rhs_val)?,
            "-" => acc.checked_sub(rhs_val)?,
            word if word.eq_ignore_ascii_case("atau") => return None,
            _ => return None,
        };
    }
    Some(acc)
}

fn fold_multiplicative(children: &[ParseNode], table: &SymbolTable) -> Option<i64> {
    let mut iter = children.iter();
    let mut acc = evaluate_constant_expression(iter.next()?, table)?;
    loop {
        let Some(op) = iter.next() else { break };
        let rhs = iter.next()?;
        let rhs_val = evaluate_constant_expression(rhs, table)?;
        let lexeme = op.token.as_ref()?.lexeme.to_ascii_lowercase();
        acc = match lexeme.as_str() {
            "*" => acc.checked_mul(rhs_val)?,
            "/" => return None, // real division never yields an integer bound
            "bagi" => acc.checked_div(rhs_val)?,
            "mod" => acc.checked_rem(rhs_val)?,
            "dan" => return None,
            _ => return None,
        };
    }
    Some(acc)
}

fn fold_factor(node: &ParseNode, table: &SymbolTable) -> Option<i64> {
    match node.children.as_slice() {
        [only] if only.is_leaf() => fold_leaf(only, table),
        [only] => evaluate_constant_expression(only, table),
        [paren_open, inner, _paren_close] if paren_open.is_leaf() => {
            evaluate_constant_expression(inner, table)
        }
        [not_tok, operand] if not_tok.is_leaf() => {
            let _ = evaluate_constant_expression(operand, table)?;
            None // 'tidak' never yields an integer
        }
        _ => None,
    }
}

fn fold_leaf(leaf: &ParseNode, table: &SymbolTable) -> Option<i64> {
    let token = leaf.token.as_ref()?;
    use idpasc_lex::TokenKind;
    match token.kind {
        TokenKind::Number => token.lexeme.parse::<i64>().ok(),
        TokenKind::Identifier => table.get_constant_value(token.symbol())?.as_int(),
        _ => None,
    }
}
