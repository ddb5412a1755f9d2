//! Expressions.
//!
//! ```text
//! <expression>          ::= <simple-expression> [<rel-op> <simple-expression>]
//! <simple-expression>   ::= [ '+'|'-' ] <term> {<add-op> <term>}
//! <term>                ::= <factor> {<mul-op> <factor>}
//! <factor>              ::= NUMBER | CHAR_LIT | STRING_LIT | IDENT
//!                         | '(' <expression> ')' | 'tidak' <factor> | <proc-call>
//! <rel-op>              ::= '='|'<>'|'<'|'<='|'>'|'>='
//! <add-op>              ::= '+'|'-'|'atau'
//! <mul-op>              ::= '*'|'/'|'bagi'|'mod'|'dan'
//! ```
//!
//! Precedence (low to high): relational, additive/`atau`, multiplicative/`dan`,
//! unary `tidak`/unary sign, primary — encoded directly in the call chain
//! below rather than a binding-power table, since the grammar has only four
//! fixed levels and no operator appears at more than one of them.

use idpasc_lex::TokenKind;

use crate::ast::{NonTerminal, ParseNode};
use crate::{ParseResult, Parser};

const ADD_OPS: &[&str] = &["+", "-"];
const MUL_OPS: &[&str] = &["*", "/", "bagi", "mod"];

pub(crate) fn parse_expression(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![parse_simple_expression(p)?];
    if is_rel_op(p) {
        children.push(p.bump());
        children.push(parse_simple_expression(p)?);
    }
    Ok(ParseNode::new(NonTerminal::Expression, children))
}

pub(crate) fn parse_simple_expression(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = Vec::new();
    if is_add_op(p) {
        children.push(p.bump());
    }
    children.push(parse_term(p)?);
    while is_add_op(p) {
        children.push(p.bump());
        children.push(parse_term(p)?);
    }
    Ok(ParseNode::new(NonTerminal::SimpleExpression, children))
}

fn parse_term(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![parse_factor(p)?];
    while is_mul_op(p) {
        children.push(p.bump());
        children.push(parse_factor(p)?);
    }
    Ok(ParseNode::new(NonTerminal::Term, children))
}

fn parse_factor(p: &mut Parser) -> ParseResult<ParseNode> {
    if p.check(TokenKind::Number)
        || p.check(TokenKind::CharLiteral)
        || p.check(TokenKind::StringLiteral)
    {
        return Ok(ParseNode::new(NonTerminal::Factor, vec![p.bump()]));
    }
    if is_not_op(p) {
        let not_tok = p.bump();
        let operand = parse_factor(p)?;
        return Ok(ParseNode::new(NonTerminal::Factor, vec![not_tok, operand]));
    }
    if p.check(TokenKind::LParenthesis) {
        let children = vec![
            p.bump(),
            parse_expression(p)?,
            p.expect(TokenKind::RParenthesis)?,
        ];
        return Ok(ParseNode::new(NonTerminal::Factor, children));
    }
    if p.check(TokenKind::Identifier) {
        // A call (`f(...)`) and a variable reference (`a`, `a.b`, `a[i]`)
        // share the leading IDENT; one token of lookahead decides — only a
        // following '(' makes it a call.
        if p.lookahead(1).kind == TokenKind::LParenthesis {
            return Ok(ParseNode::new(
                NonTerminal::Factor,
                vec![crate::stmt::parse_proc_call(p)?],
            ));
        }
        return Ok(ParseNode::new(
            NonTerminal::Factor,
            vec![crate::stmt::parse_variable(p)?],
        ));
    }
    Err(p.error_here("expected a factor (number, literal, identifier, '(', or 'tidak')"))
}

fn is_rel_op(p: &Parser) -> bool {
    const REL_OPS: &[&str] = &["=", "<>", "<", "<=", ">", ">="];
    p.check(TokenKind::RelationalOperator) && REL_OPS.contains(&p.current().lexeme.as_str())
}

fn is_add_op(p: &Parser) -> bool {
    (p.check(TokenKind::ArithmeticOperator) && ADD_OPS.contains(&p.current().lexeme.as_str()))
        || (p.check(TokenKind::LogicalOperator) && p.current().lexeme.eq_ignore_ascii_case("atau"))
}

fn is_mul_op(p: &Parser) -> bool {
    (p.check(TokenKind::ArithmeticOperator)
        && MUL_OPS.contains(&p.current().lexeme.to_ascii_lowercase().as_str()))
        || (p.check(TokenKind::LogicalOperator) && p.current().lexeme.eq_ignore_ascii_case("dan"))
}

fn is_not_op(p: &Parser) -> bool {
    p.check(TokenKind::LogicalOperator) && p.current().lexeme.eq_ignore_ascii_case("tidak")
}
