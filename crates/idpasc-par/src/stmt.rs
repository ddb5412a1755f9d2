//! Statements.
//!
//! ```text
//! <compound-statement>  ::= 'mulai' <statement-list> 'selesai'
//! <statement-list>      ::= [<statement> {';' <statement>}]
//! <statement>           ::= <assignment> | <if> | <while> | <for>
//!                         | <repeat> | <case> | <proc-call> | <compound-statement> | ε
//! <assignment>          ::= <variable> ':=' <expression>
//! <variable>            ::= IDENT {'.' IDENT | '[' <expression> {',' <expression>} ']'}
//! <if>                  ::= 'jika' <expression> 'maka' <statement> ['selainitu' <statement>]
//! <while>               ::= 'selama' <expression> 'lakukan' <statement>
//! <for>                 ::= 'untuk' IDENT ':=' <expression> ('ke'|'turunke') <expression> 'lakukan' <statement>
//! <repeat>              ::= 'ulangi' <statement-list> 'sampai' <expression>
//! <case>                ::= 'kasus' <expression> 'dari' <case-element>* 'selesai'
//! <case-element>        ::= <const-value> {',' <const-value>} ':' <statement>
//! <proc-call>           ::= (IDENT | 'writeln'|'readln'|'write'|'read') ['(' <expression> {',' <expression>} ')']
//! ```
//!
//! **Ambiguity 2** (`<statement>` starting with `IDENT`): an assignment and
//! a procedure call share the `<variable>`-shaped prefix. Save the cursor,
//! parse a `<variable>` (always succeeds from an identifier — its
//! continuations are optional), check whether `:=` follows, then rewind and
//! commit to the matching production. The built-in I/O names
//! (`writeln`/`readln`/`write`/`read`) are never assignable, so they skip
//! the backtracking and go straight to `<proc-call>`.

use idpasc_lex::TokenKind;

use crate::ast::{NonTerminal, ParseNode};
use crate::{ParseResult, Parser};

const IO_PROCS: &[&str] = &["writeln", "readln", "write", "read"];

pub(crate) fn parse_compound_statement(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        p.expect_keyword("mulai")?,
        parse_statement_list(p)?,
        p.expect_keyword("selesai")?,
    ];
    Ok(ParseNode::new(NonTerminal::CompoundStatement, children))
}

fn parse_statement_list(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![parse_statement(p)?];
    while p.check(TokenKind::Semicolon) {
        children.push(p.bump());
        children.push(parse_statement(p)?);
    }
    Ok(ParseNode::new(NonTerminal::StatementList, children))
}

fn parse_statement(p: &mut Parser) -> ParseResult<ParseNode> {
    if p.check_keyword("jika") {
        return Ok(ParseNode::new(NonTerminal::Statement, vec![parse_if(p)?]));
    }
    if p.check_keyword("selama") {
        return Ok(ParseNode::new(NonTerminal::Statement, vec![parse_while(p)?]));
    }
    if p.check_keyword("untuk") {
        return Ok(ParseNode::new(NonTerminal::Statement, vec![parse_for(p)?]));
    }
    if p.check_keyword("ulangi") {
        return Ok(ParseNode::new(NonTerminal::Statement, vec![parse_repeat(p)?]));
    }
    if p.check_keyword("kasus") {
        return Ok(ParseNode::new(NonTerminal::Statement, vec![parse_case(p)?]));
    }
    if p.check_keyword("mulai") {
        return Ok(ParseNode::new(
            NonTerminal::Statement,
            vec![parse_compound_statement(p)?],
        ));
    }
    if IO_PROCS.iter().any(|kw| p.check_keyword(kw)) {
        return Ok(ParseNode::new(
            NonTerminal::Statement,
            vec![parse_proc_call(p)?],
        ));
    }
    if p.check(TokenKind::Identifier) {
        let mark = p.mark();
        parse_variable(p)?;
        let is_assignment = p.check(TokenKind::AssignOperator);
        p.reset(mark);
        let inner = if is_assignment {
            parse_assignment(p)?
        } else {
            parse_proc_call(p)?
        };
        return Ok(ParseNode::new(NonTerminal::Statement, vec![inner]));
    }
    // ε: an empty statement, e.g. between a tolerated trailing ';' and 'selesai'/'sampai'.
    Ok(ParseNode::new(NonTerminal::Statement, Vec::new()))
}

pub(crate) fn parse_variable(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.expect(TokenKind::Identifier)?];
    loop {
        if p.check(TokenKind::Dot) {
            children.push(p.bump());
            children.push(p.expect(TokenKind::Identifier)?);
        } else if p.check(TokenKind::LBracket) {
            children.push(p.bump());
            children.push(crate::expr::parse_expression(p)?);
            while p.check(TokenKind::Comma) {
                children.push(p.bump());
                children.push(crate::expr::parse_expression(p)?);
            }
            children.push(p.expect(TokenKind::RBracket)?);
        } else {
            break;
        }
    }
    Ok(ParseNode::new(NonTerminal::Variable, children))
}

fn parse_assignment(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        parse_variable(p)?,
        p.expect(TokenKind::AssignOperator)?,
        crate::expr::parse_expression(p)?,
    ];
    Ok(ParseNode::new(NonTerminal::Assignment, children))
}

pub(crate) fn parse_proc_call(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.bump()];
    if p.check(TokenKind::LParenthesis) {
        children.push(p.bump());
        if !p.check(TokenKind::RParenthesis) {
            children.push(crate::expr::parse_expression(p)?);
            while p.check(TokenKind::Comma) {
                children.push(p.bump());
                children.push(crate::expr::parse_expression(p)?);
            }
        }
        children.push(p.expect(TokenKind::RParenthesis)?);
    }
    Ok(ParseNode::new(NonTerminal::ProcCall, children))
}

fn parse_if(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![
        p.expect_keyword("jika")?,
        crate::expr::parse_expression(p)?,
        p.expect_keyword("maka")?,
        parse_statement(p)?,
    ];
    if p.check_keyword("selainitu") {
        children.push(p.bump());
        children.push(parse_statement(p)?);
    }
    Ok(ParseNode::new(NonTerminal::If, children))
}

fn parse_while(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        p.expect_keyword("selama")?,
        crate::expr::parse_expression(p)?,
        p.expect_keyword("lakukan")?,
        parse_statement(p)?,
    ];
    Ok(ParseNode::new(NonTerminal::While, children))
}

fn parse_for(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![
        p.expect_keyword("untuk")?,
        p.expect(TokenKind::Identifier)?,
        p.expect(TokenKind::AssignOperator)?,
        crate::expr::parse_expression(p)?,
    ];
    children.push(if p.check_keyword("ke") {
        p.expect_keyword("ke")?
    } else {
        p.expect_keyword("turunke")?
    });
    children.push(crate::expr::parse_expression(p)?);
    children.push(p.expect_keyword("lakukan")?);
    children.push(parse_statement(p)?);
    Ok(ParseNode::new(NonTerminal::For, children))
}

fn parse_repeat(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        p.expect_keyword("ulangi")?,
        parse_statement_list(p)?,
        p.expect_keyword("sampai")?,
        crate::expr::parse_expression(p)?,
    ];
    Ok(ParseNode::new(NonTerminal::Repeat, children))
}

fn parse_case(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![
        p.expect_keyword("kasus")?,
        crate::expr::parse_expression(p)?,
        p.expect_keyword("dari")?,
    ];
    if is_const_value_start(p) {
        children.push(parse_case_element(p)?);
        // Case elements are semicolon-separated, and (like a statement
        // list) a trailing semicolon before 'selesai' is tolerated.
        while p.check(TokenKind::Semicolon) {
            let mark = p.mark();
            let semicolon = p.bump();
            if is_const_value_start(p) {
                children.push(semicolon);
                children.push(parse_case_element(p)?);
            } else {
                p.reset(mark);
                break;
            }
        }
    }
    children.push(p.expect_keyword("selesai")?);
    Ok(ParseNode::new(NonTerminal::Case, children))
}

fn is_const_value_start(p: &Parser) -> bool {
    matches!(
        p.current().kind,
        TokenKind::Number | TokenKind::StringLiteral | TokenKind::CharLiteral | TokenKind::Identifier
    )
}

fn parse_case_element(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![crate::items::parse_const_value(p)?];
    while p.check(TokenKind::Comma) {
        children.push(p.bump());
        children.push(crate::items::parse_const_value(p)?);
    }
    children.push(p.expect(TokenKind::Colon)?);
    children.push(parse_statement(p)?);
    Ok(ParseNode::new(NonTerminal::CaseElement, children))
}
