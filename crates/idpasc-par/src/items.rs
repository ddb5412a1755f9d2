//! Top-level structure: `<program>`, declarations, and subprogram headers.
//!
//! ```text
//! <program>             ::= <program-header> <declaration-part> <compound-statement> DOT
//! <program-header>      ::= 'program' IDENT ';'
//! <declaration-part>    ::= {<const-decl>} {<type-decl>} {<var-decl>} {<subprogram-decl>}
//! <const-decl>          ::= 'konstanta' <const-item>+
//! <const-item>          ::= IDENT '=' <const-value> ';'
//! <type-decl>           ::= 'tipe' <type-item>+
//! <type-item>           ::= IDENT '=' <type-definition> ';'
//! <var-decl>            ::= 'variabel' <var-item>+
//! <var-item>            ::= <ident-list> ':' <type> ';'
//! <ident-list>          ::= IDENT {',' IDENT}
//! <subprogram-decl>     ::= 'prosedur' IDENT [<formal-params>] ';' <block> ';'
//!                         | 'fungsi'   IDENT [<formal-params>] ':' <type> ';' <block> ';'
//! <formal-params>       ::= '(' <param-group> {';' <param-group>} ')'
//! <param-group>         ::= <ident-list> ':' <type>
//! <block>               ::= <declaration-part> <compound-statement>
//! ```

use idpasc_lex::TokenKind;

use crate::ast::{NonTerminal, ParseNode};
use crate::{ParseResult, Parser};

pub fn parse_program(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![parse_program_header(p)?];
    children.push(parse_declaration_part(p)?);
    children.push(crate::stmt::parse_compound_statement(p)?);
    children.push(p.expect(TokenKind::Dot)?);
    Ok(ParseNode::new(NonTerminal::Program, children))
}

fn parse_program_header(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        p.expect_keyword("program")?,
        p.expect(TokenKind::Identifier)?,
        p.expect(TokenKind::Semicolon)?,
    ];
    Ok(ParseNode::new(NonTerminal::ProgramHeader, children))
}

pub(crate) fn parse_declaration_part(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = Vec::new();
    while p.check_keyword("konstanta") {
        children.push(parse_const_decl(p)?);
    }
    while p.check_keyword("tipe") {
        children.push(parse_type_decl(p)?);
    }
    while p.check_keyword("variabel") {
        children.push(parse_var_decl(p)?);
    }
    while p.check_keyword("prosedur") || p.check_keyword("fungsi") {
        children.push(parse_subprogram_decl(p)?);
    }
    Ok(ParseNode::new(NonTerminal::DeclarationPart, children))
}

fn parse_const_decl(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.expect_keyword("konstanta")?];
    children.push(parse_const_item(p)?);
    while p.check(TokenKind::Identifier) {
        children.push(parse_const_item(p)?);
    }
    Ok(ParseNode::new(NonTerminal::ConstDecl, children))
}

fn parse_const_item(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        p.expect(TokenKind::Identifier)?,
        p.expect_one_of(TokenKind::RelationalOperator, &["="])?,
        parse_const_value(p)?,
        p.expect(TokenKind::Semicolon)?,
    ];
    Ok(ParseNode::new(NonTerminal::ConstItem, children))
}

pub(crate) fn parse_const_value(p: &mut Parser) -> ParseResult<ParseNode> {
    match p.current().kind {
        TokenKind::Number
        | TokenKind::StringLiteral
        | TokenKind::CharLiteral
        | TokenKind::Identifier => Ok(p.bump()),
        _ => Err(p.error_here("expected a constant value (number, string, char, or identifier)")),
    }
}

fn parse_type_decl(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.expect_keyword("tipe")?];
    children.push(parse_type_item(p)?);
    while p.check(TokenKind::Identifier) {
        children.push(parse_type_item(p)?);
    }
    Ok(ParseNode::new(NonTerminal::TypeDecl, children))
}

fn parse_type_item(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        p.expect(TokenKind::Identifier)?,
        p.expect_one_of(TokenKind::RelationalOperator, &["="])?,
        crate::types::parse_type_definition(p)?,
        p.expect(TokenKind::Semicolon)?,
    ];
    Ok(ParseNode::new(NonTerminal::TypeItem, children))
}

fn parse_var_decl(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.expect_keyword("variabel")?];
    children.push(parse_var_item(p)?);
    while p.check(TokenKind::Identifier) {
        children.push(parse_var_item(p)?);
    }
    Ok(ParseNode::new(NonTerminal::VarDecl, children))
}

pub(crate) fn parse_var_item(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![parse_ident_list(p)?, p.expect(TokenKind::Colon)?];
    children.push(crate::types::parse_type(p)?);
    children.push(p.expect(TokenKind::Semicolon)?);
    Ok(ParseNode::new(NonTerminal::VarItem, children))
}

/// `<ident-list> ::= IDENT {',' IDENT}`. Shared by var declarations and
/// formal parameter groups.
pub(crate) fn parse_ident_list(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.expect(TokenKind::Identifier)?];
    while let Some(comma) = p.match_kind(TokenKind::Comma) {
        children.push(comma);
        children.push(p.expect(TokenKind::Identifier)?);
    }
    Ok(ParseNode::new(NonTerminal::IdentList, children))
}

fn parse_subprogram_decl(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = Vec::new();
    if p.check_keyword("prosedur") {
        children.push(p.expect_keyword("prosedur")?);
        children.push(p.expect(TokenKind::Identifier)?);
        if p.check(TokenKind::LParenthesis) {
            children.push(parse_formal_params(p)?);
        }
        children.push(p.expect(TokenKind::Semicolon)?);
        children.push(parse_block(p)?);
        children.push(p.expect(TokenKind::Semicolon)?);
    } else {
        children.push(p.expect_keyword("fungsi")?);
        children.push(p.expect(TokenKind::Identifier)?);
        if p.check(TokenKind::LParenthesis) {
            children.push(parse_formal_params(p)?);
        }
        children.push(p.expect(TokenKind::Colon)?);
        children.push(crate::types::parse_type(p)?);
        children.push(p.expect(TokenKind::Semicolon)?);
        children.push(parse_block(p)?);
        children.push(p.expect(TokenKind::Semicolon)?);
    }
    Ok(ParseNode::new(NonTerminal::SubprogramDecl, children))
}

fn parse_formal_params(p: &mut Parser) -> ParseResult<ParseNode> {
    let mut children = vec![p.expect(TokenKind::LParenthesis)?, parse_param_group(p)?];
    while p.check(TokenKind::Semicolon) {
        children.push(p.bump());
        children.push(parse_param_group(p)?);
    }
    children.push(p.expect(TokenKind::RParenthesis)?);
    Ok(ParseNode::new(NonTerminal::FormalParams, children))
}

fn parse_param_group(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        parse_ident_list(p)?,
        p.expect(TokenKind::Colon)?,
        crate::types::parse_type(p)?,
    ];
    Ok(ParseNode::new(NonTerminal::ParamGroup, children))
}

pub(crate) fn parse_block(p: &mut Parser) -> ParseResult<ParseNode> {
    let children = vec![
        parse_declaration_part(p)?,
        crate::stmt::parse_compound_statement(p)?,
    ];
    Ok(ParseNode::new(NonTerminal::Block, children))
}
