//! Type expressions, array/record types, and ranges.
//!
//! ```text
//! <type-definition>     ::= <type> | <range>
//! <type>                ::= 'integer'|'real'|'boolean'|'char'|'string'
//!                         | <array-type> | <record-type> | IDENT
//! <array-type>          ::= 'larik' '[' <index-spec> {',' <index-spec>} ']' 'dari' <type>
//! <index-spec>          ::= <range> | <simple-expression>
//! <range>               ::= <simple-expression> '..' <simple-expression>
//! <record-type>         ::= 'rekaman' {<var-item>} 'selesai'
//! ```
//!
//! **Ambiguity 1** (`<type-definition>`): a range always opens with a
//! constant expression, never with a type keyword, so the next token
//! decides: `NUMBER`, or `IDENT` followed directly by `RANGE_OPERATOR`,
//! commits to a range; anything else is a type. No backtracking is needed
//! here because the two alternatives share no token in common at this
//! position once the lexer always emits a single `..` token (see the open
//! question resolved in `idpasc_lex::lexer::operator`).
//!
//! **Ambiguity 3** (`<index-spec>`): ranges and simple expressions share an
//! arbitrarily long common prefix (`<simple-expression>`), so this one
//! genuinely backtracks — save the cursor, attempt a range, and on failure
//! rewind and parse a simple expression instead.

use idpasc_lex::TokenKind;

use crate::ast::{NonTerminal, ParseNode};
use crate::{ParseResult, Parser};

const BASE_TYPE_KEYWORDS: &[&str] = &["integer", "real", "boolean", "char", "string"];

pub(crate) fn parse_type_definition(p: &mut Parser) -> ParseResult<ParseNode> {
    let looks_like_range = p.check(TokenKind::Number)
        || (p.check(TokenKind::Identifier) && p.lookahead(1).kind == TokenKind::RangeOperator);
    let inner = if looks_like_range {
        parse_range(p)?
    } else {
        parse_type(p)?
    };
    Ok(ParseNode::new(NonTerminal::TypeDefinition, vec![inner]))
}

pub(crate) fn parse_type(p: &mut Parser) -> ParseResult<ParseNode> {
    if p.check_keyword("larik") {
        return parse_array_type(p);
    }
    if p.check_keyword("rekaman") {
        return parse_record_type(p);
    }
    for kw in BASE_TYPE_KEYWORDS {
        if p.check_keyword(kw) {
            return Ok(ParseNode::new(NonTerminal::Type, vec![p.bump()]));
        }
    }
    if p.check(TokenKind::Identifier) {
        return Ok(ParseNode::new(NonTerminal::Type, vec![p.bump()]));
    }
    Err(p.error_here("expected a type"))
}

fn parse_array_type(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![
        p.expect_keyword("larik")?,
        p.expect(TokenKind::LBracket)?,
        parse_index_spec(p)?,
    ];
    while p.check(TokenKind::Comma) {
        children.push(p.bump());
        children.push(parse_index_spec(p)?);
    }
    children.push(p.expect(TokenKind::RBracket)?);
    children.push(p.expect_keyword("dari")?);
    children.push(parse_type(p)?);
    Ok(ParseNode::new(NonTerminal::ArrayType, children))
}

/// `<index-spec> ::= <range> | <simple-expression>` — the third
/// backtracking point: try a range first, rewind on failure.
fn parse_index_spec(p: &mut Parser) -> ParseResult<ParseNode> {
    let mark = p.mark();
    match parse_range(p) {
        Ok(range) => Ok(ParseNode::new(NonTerminal::IndexSpec, vec![range])),
        Err(_) => {
            p.reset(mark);
            let expr = crate::expr::parse_simple_expression(p)?;
            Ok(ParseNode::new(NonTerminal::IndexSpec, vec![expr]))
        }
    }
}

fn parse_range(p: &mut Parser) -> ParseResult<ParseNode> {
    let low = crate::expr::parse_simple_expression(p)?;
    let dotdot = p.expect(TokenKind::RangeOperator)?;
    let high = crate::expr::parse_simple_expression(p)?;
    Ok(ParseNode::new(NonTerminal::Range, vec![low, dotdot, high]))
}

fn parse_record_type(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.expect_keyword("rekaman")?];
    while p.check(TokenKind::Identifier) {
        children.push(crate::items::parse_var_item(p)?);
    }
    children.push(p.expect_keyword("selesai")?);
    Ok(ParseNode::new(NonTerminal::RecordType, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use idpasc_lex::Lexer;
    use idpasc_util::Handler;

    fn parse_source(source: &str) -> ParseResult<ParseNode> {
        let handler = Handler::new();
        parse(Lexer::tokenize(source, &handler))
    }

    #[test]
    fn array_type_with_range_index_parses() {
        let source =
            "program p; variabel a: larik[1..10] dari integer; mulai selesai.";
        assert!(parse_source(source).is_ok());
    }

    #[test]
    fn array_type_with_identifier_index_falls_back_to_expression() {
        let source =
            "program p; konstanta n = 5; variabel a: larik[n] dari integer; mulai selesai.";
        assert!(parse_source(source).is_ok());
    }

    #[test]
    fn record_type_parses_its_fields() {
        let source =
            "program p; tipe titik = rekaman x, y: integer; selesai; mulai selesai.";
        assert!(parse_source(source).is_ok());
    }

    #[test]
    fn type_alias_to_identifier_parses() {
        let source = "program p; tipe angka = integer; mulai selesai.";
        assert!(parse_source(source).is_ok());
    }

    #[test]
    fn range_type_definition_distinguishes_from_plain_type() {
        let source = "program p; tipe skor = 0..100; mulai selesai.";
        assert!(parse_source(source).is_ok());
    }
}
