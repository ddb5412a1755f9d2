//! The semantic analyzer (§4.4): walks a successfully parsed `<program>`
//! tree once, building the triple symbol table alongside a decorated AST.
//! Every declaration is entered before the block's statements are walked,
//! so forward references within the same block resolve exactly like a
//! single-pass Wirth-style compiler — no forward declarations, no fixups.
//!
//! Diagnostics never abort the walk: an unresolved identifier, a type
//! mismatch, or a bad call all still produce a decorated node (carrying
//! `DataType::Void` or `Expr::Error` where nothing better is known) so one
//! malformed statement doesn't suppress every diagnostic after it.

use idpasc_lex::{Token, TokenKind};
use idpasc_par::{NonTerminal, ParseNode};
use idpasc_util::diagnostic::DiagnosticCode as Code;
use idpasc_util::{Handler, Idx, Span, Symbol};

use crate::hir::{
    self, CaseArm, ConstDecl, Declaration, Declarations, Expr, FunctionDecl, NumberValue,
    ParamDecl, ProcedureDecl, Program, Stmt, TypeDecl, VarDecl,
};
use crate::infer::evaluate_constant_expression;
use crate::scope::{ArrId, ConstValue, ObjKind, SymbolTable, TabId};
use crate::types::{arithmetic_result_type, is_assignable, is_param_assignable, BinOp, DataType};

/// Everything [`analyze`] hands back: the decorated AST, the rendered
/// error list (§6's `errors: [string]`), and the finished symbol table —
/// `tab`/`btab`/`atab` are public fields of [`SymbolTable`] itself, so a
/// caller reaches them as `output.table.tab` etc. rather than through a
/// second copy.
pub struct AnalysisOutput {
    pub ast: Program,
    pub errors: Vec<String>,
    pub table: SymbolTable,
}

/// Run the analyzer over a parsed `<program>` tree.
pub fn analyze(tree: &ParseNode) -> AnalysisOutput {
    let mut analyzer = Analyzer {
        table: SymbolTable::new(),
        handler: Handler::new(),
    };
    let ast = analyzer.analyze_program(tree);
    let errors = analyzer
        .handler
        .diagnostics()
        .iter()
        .map(|d| d.to_literal_string())
        .collect();
    AnalysisOutput {
        ast,
        errors,
        table: analyzer.table,
    }
}

struct Analyzer {
    table: SymbolTable,
    handler: Handler,
}

fn leaf_token(node: &ParseNode) -> &Token {
    node.token.as_ref().expect("expected a leaf token")
}

/// Strip the surrounding `'…'` quotes and collapse the Pascal `''`
/// doubled-quote escape down to a single `'`.
fn unescape_pascal_string(lexeme: &str) -> String {
    let inner = &lexeme[1..lexeme.len().saturating_sub(1)];
    inner.replace("''", "'")
}

impl Analyzer {
    fn error(&self, code: Code, tok: &Token, message: impl Into<String>) {
        self.handler
            .build_error(Span::point(tok.line, tok.column), message)
            .code(code)
            .emit(&self.handler);
    }

    // ---- §4.4.1 program/declaration structure --------------------------

    fn analyze_program(&mut self, node: &ParseNode) -> Program {
        let header = &node.children[0];
        let name = leaf_token(&header.children[1]).symbol();

        self.table.enter_block();
        let declarations = self.analyze_declaration_part(&node.children[1]);
        let body = self.analyze_compound_statement(&node.children[2]);
        self.table.leave_block();

        Program {
            name,
            declarations: Declarations { items: declarations },
            body,
        }
    }

    fn analyze_declaration_part(&mut self, node: &ParseNode) -> Vec<Declaration> {
        let mut out = Vec::new();
        for child in &node.children {
            match child.kind {
                NonTerminal::ConstDecl => out.extend(self.analyze_const_decl(child)),
                NonTerminal::TypeDecl => out.extend(self.analyze_type_decl(child)),
                NonTerminal::VarDecl => out.extend(self.analyze_var_decl(child)),
                NonTerminal::SubprogramDecl => out.push(self.analyze_subprogram_decl(child)),
                _ => {}
            }
        }
        out
    }

    // ---- constants -------------------------------------------------------

    fn analyze_const_decl(&mut self, node: &ParseNode) -> Vec<Declaration> {
        node.children
            .iter()
            .skip(1)
            .map(|item| self.analyze_const_item(item))
            .collect()
    }

    fn analyze_const_item(&mut self, node: &ParseNode) -> Declaration {
        let name_tok = leaf_token(&node.children[0]).clone();
        let name = name_tok.symbol();
        let (const_value, data_type) = self.evaluate_const_value(&node.children[2]);

        if self.table.find_in_current_block(name).is_some() {
            self.error(
                Code::E_SEMANTIC_DUPLICATE_IDENT,
                &name_tok,
                format!("duplicate identifier '{}'", name_tok.lexeme),
            );
        }

        let tab_index = self.table.enter_identifier(
            name,
            ObjKind::Constant,
            data_type,
            None,
            false,
            1,
            Some(const_value),
        );
        Declaration::Const(ConstDecl { identifier: name, tab_index, data_type })
    }

    /// A `<const-value>` is a single raw leaf token — `NUMBER`,
    /// `STRING_LITERAL`, `CHAR_LITERAL`, or `IDENT` referring to a prior
    /// constant. Reports E3001 itself on an unresolved identifier, since
    /// the caller has no other chance to catch that case.
    fn evaluate_const_value(&self, leaf: &ParseNode) -> (ConstValue, DataType) {
        let tok = leaf_token(leaf);
        match tok.kind {
            TokenKind::Number => {
                if tok.lexeme.contains('.') {
                    (ConstValue::Real(tok.lexeme.parse().unwrap_or(0.0)), DataType::Real)
                } else {
                    (ConstValue::Int(tok.lexeme.parse().unwrap_or(0)), DataType::Integer)
                }
            }
            TokenKind::StringLiteral | TokenKind::CharLiteral => {
                let content = unescape_pascal_string(&tok.lexeme);
                if content.chars().count() == 1 {
                    (ConstValue::Char(content.chars().next().unwrap_or('\0')), DataType::Char)
                } else {
                    (ConstValue::Str(content), DataType::String)
                }
            }
            TokenKind::Identifier => match self.table.get_constant_value(tok.symbol()) {
                Some(prev) => (prev.clone(), prev.data_type()),
                None => {
                    self.error(
                        Code::E_SEMANTIC_UNDEFINED_IDENT,
                        tok,
                        format!("undefined identifier '{}'", tok.lexeme),
                    );
                    (ConstValue::Int(0), DataType::Void)
                }
            },
            _ => (ConstValue::Int(0), DataType::Void),
        }
    }

    // ---- types -------------------------------------------------------

    fn analyze_type_decl(&mut self, node: &ParseNode) -> Vec<Declaration> {
        node.children
            .iter()
            .skip(1)
            .map(|item| self.analyze_type_item(item))
            .collect()
    }

    fn analyze_type_item(&mut self, node: &ParseNode) -> Declaration {
        let name_tok = leaf_token(&node.children[0]).clone();
        let name = name_tok.symbol();

        if self.table.find_in_current_block(name).is_some() {
            self.error(
                Code::E_SEMANTIC_DUPLICATE_IDENT,
                &name_tok,
                format!("duplicate identifier '{}'", name_tok.lexeme),
            );
        }

        let (data_type, aref, fields) = self.analyze_type_definition(&node.children[2]);
        let tab_index = self.table.enter_identifier(name, ObjKind::Type, data_type, aref, false, 0, None);
        if let Some(fields) = fields {
            self.table.set_record_fields(tab_index, fields);
        }
        Declaration::Type(TypeDecl { identifier: name, tab_index, data_type })
    }

    /// `<type-definition> ::= <type> | <range>` — a bare `TypeDefinition`
    /// node wrapping either kind directly (never both). A bare range type
    /// alias (`tipe skor = 0..100;`) behaves as `INTEGER`: ranges in this
    /// language are always integer-bounded, so there is nothing else for
    /// the alias to mean.
    fn analyze_type_definition(
        &mut self,
        node: &ParseNode,
    ) -> (DataType, Option<ArrId>, Option<Vec<(Symbol, DataType)>>) {
        let inner = &node.children[0];
        if inner.kind == NonTerminal::Range {
            let low = evaluate_constant_expression(&inner.children[0], &self.table);
            let high = evaluate_constant_expression(&inner.children[2], &self.table);
            if let (Some(low), Some(high)) = (low, high) {
                if low > high {
                    if let Some(tok) = inner.children[0].leaf_tokens().first().copied() {
                        self.error(
                            Code::E_SEMANTIC_INVALID_ARRAY_BOUNDS,
                            tok,
                            format!("invalid array bounds: low {} > high {}", low, high),
                        );
                    }
                }
            }
            (DataType::Integer, None, None)
        } else {
            self.analyze_type_expr(inner)
        }
    }

    /// Resolves a `Type`/`ArrayType`/`RecordType` node exactly as
    /// `parse_type` produces it — base-type keyword, type-alias `IDENT`,
    /// or an unwrapped array/record node, never nested inside a `Type`
    /// wrapper for the latter two.
    fn analyze_type_expr(
        &mut self,
        node: &ParseNode,
    ) -> (DataType, Option<ArrId>, Option<Vec<(Symbol, DataType)>>) {
        match node.kind {
            NonTerminal::Type => {
                let tok = leaf_token(&node.children[0]);
                if let Some(base) = DataType::from_base_type_name(&tok.lexeme) {
                    (base, None, None)
                } else {
                    match self.table.find_identifier(tok.symbol()) {
                        Some(idx) => {
                            let entry = &self.table.tab[TabId::from_usize(idx)];
                            (entry.data_type, entry.reference, entry.record_fields.clone())
                        }
                        None => {
                            self.error(
                                Code::E_SEMANTIC_UNDEFINED_IDENT,
                                tok,
                                format!("undefined type '{}'", tok.lexeme),
                            );
                            (DataType::Void, None, None)
                        }
                    }
                }
            }
            NonTerminal::ArrayType => self.analyze_array_type(node),
            NonTerminal::RecordType => self.analyze_record_type(node),
            _ => (DataType::Void, None, None),
        }
    }

    /// `larik '[' <index-spec> {',' <index-spec>} ']' 'dari' <type>` —
    /// builds `atab` rows innermost-outward: the element type nearest
    /// `dari` becomes the last dimension's element, and each earlier
    /// `<index-spec>` wraps the previous dimension as its own element.
    fn analyze_array_type(
        &mut self,
        node: &ParseNode,
    ) -> (DataType, Option<ArrId>, Option<Vec<(Symbol, DataType)>>) {
        let rbracket_idx = node
            .children
            .iter()
            .position(|c| c.token.as_ref().map(|t| t.kind) == Some(TokenKind::RBracket))
            .expect("array type always has a closing ']'");
        let index_specs: Vec<&ParseNode> = node.children[2..rbracket_idx]
            .iter()
            .filter(|c| c.kind == NonTerminal::IndexSpec)
            .collect();
        let elem_node = &node.children[rbracket_idx + 2];
        let (elem_type, elem_aref, elem_fields) = self.analyze_type_expr(elem_node);

        let mut cur_type = elem_type;
        let mut cur_aref = elem_aref;
        let mut cur_size = if elem_type == DataType::Array {
            cur_aref.map(|a| self.table.atab[a].size).unwrap_or(0)
        } else {
            1
        };

        for spec in index_specs.iter().rev() {
            let (low, high) = self.analyze_index_spec(spec);
            let id = self.table.enter_array(DataType::Integer, cur_type, cur_aref, low, high, cur_size);
            cur_size = self.table.atab[id].size;
            cur_aref = Some(id);
            cur_type = DataType::Array;
        }
        (DataType::Array, cur_aref, elem_fields)
    }

    /// `<index-spec> ::= <range> | <simple-expression>`. A bare expression
    /// (no explicit `..`) is treated as an implicit `1..N` range — the
    /// only reading that gives it array-bound semantics at all.
    fn analyze_index_spec(&mut self, node: &ParseNode) -> (i64, i64) {
        let inner = &node.children[0];
        if inner.kind == NonTerminal::Range {
            let low = evaluate_constant_expression(&inner.children[0], &self.table).unwrap_or(0);
            let high = evaluate_constant_expression(&inner.children[2], &self.table).unwrap_or(0);
            if low > high {
                if let Some(tok) = inner.children[0].leaf_tokens().first().copied() {
                    self.error(
                        Code::E_SEMANTIC_INVALID_ARRAY_BOUNDS,
                        tok,
                        format!("invalid array bounds: low {} > high {}", low, high),
                    );
                }
            }
            (low, high)
        } else {
            let high = evaluate_constant_expression(inner, &self.table).unwrap_or(0);
            (1, high)
        }
    }

    /// `rekaman {<var-item>} selesai` — fields are recorded as
    /// name/type pairs only; they never themselves become `tab` rows
    /// (§4.4.5: records are not otherwise resolved).
    fn analyze_record_type(
        &mut self,
        node: &ParseNode,
    ) -> (DataType, Option<ArrId>, Option<Vec<(Symbol, DataType)>>) {
        let mut fields = Vec::new();
        for child in &node.children {
            if child.kind != NonTerminal::VarItem {
                continue;
            }
            let ident_list = &child.children[0];
            let (field_type, _, _) = self.analyze_type_expr(&child.children[2]);
            let mut i = 0;
            while i < ident_list.children.len() {
                fields.push((leaf_token(&ident_list.children[i]).symbol(), field_type));
                i += 2;
            }
        }
        (DataType::Record, None, Some(fields))
    }

    // ---- variables -------------------------------------------------------

    fn analyze_var_decl(&mut self, node: &ParseNode) -> Vec<Declaration> {
        node.children
            .iter()
            .skip(1)
            .flat_map(|item| self.analyze_var_item(item))
            .collect()
    }

    fn analyze_var_item(&mut self, node: &ParseNode) -> Vec<Declaration> {
        let ident_list = &node.children[0];
        let (data_type, aref, fields) = self.analyze_type_expr(&node.children[2]);
        let block_index = self.table.current_block().expect("var declared outside any block");

        let size = if data_type == DataType::Array {
            aref.map(|a| self.table.atab[a].size).unwrap_or(0)
        } else {
            1
        };

        let mut out = Vec::new();
        let mut i = 0;
        while i < ident_list.children.len() {
            let name_tok = leaf_token(&ident_list.children[i]).clone();
            let name = name_tok.symbol();
            if self.table.find_in_current_block(name).is_some() {
                self.error(
                    Code::E_SEMANTIC_DUPLICATE_IDENT,
                    &name_tok,
                    format!("duplicate identifier '{}'", name_tok.lexeme),
                );
            }
            let tab_index = self.table.enter_identifier(name, ObjKind::Variable, data_type, aref, false, size, None);
            if let Some(fields) = &fields {
                self.table.set_record_fields(tab_index, fields.clone());
            }
            out.push(Declaration::Var(VarDecl { identifier: name, data_type, tab_index, block_index }));
            i += 2;
        }
        out
    }

    // ---- subprograms -------------------------------------------------------

    fn analyze_subprogram_decl(&mut self, node: &ParseNode) -> Declaration {
        let is_function = leaf_token(&node.children[0]).lexeme.eq_ignore_ascii_case("fungsi");
        let name_tok = leaf_token(&node.children[1]).clone();
        let name = name_tok.symbol();

        let formal_params = node.children.iter().find(|c| c.kind == NonTerminal::FormalParams);
        let block_idx = node
            .children
            .iter()
            .position(|c| c.kind == NonTerminal::Block)
            .expect("subprogram declaration always has a block");

        let return_type = if is_function {
            self.analyze_type_expr(&node.children[block_idx - 2]).0
        } else {
            DataType::Void
        };

        if self.table.find_in_current_block(name).is_some() {
            self.error(
                Code::E_SEMANTIC_DUPLICATE_IDENT,
                &name_tok,
                format!("duplicate identifier '{}'", name_tok.lexeme),
            );
        }
        let obj = if is_function { ObjKind::Function } else { ObjKind::Procedure };
        let tab_index = self.table.enter_identifier(name, obj, return_type, None, false, 0, None);

        let block_id = self.table.enter_block();
        self.table.set_block_index(tab_index, block_id);

        let params = formal_params
            .map(|fp| self.analyze_formal_params(fp))
            .unwrap_or_default();

        let block_node = &node.children[block_idx];
        let declarations = self.analyze_declaration_part(&block_node.children[0]);
        let body = self.analyze_compound_statement(&block_node.children[1]);
        self.table.leave_block();

        let block = Box::new(hir::Block {
            declarations: Declarations { items: declarations },
            body,
            block_index: block_id,
        });

        if is_function {
            Declaration::Function(FunctionDecl { name, tab_index, return_type, params, block })
        } else {
            Declaration::Procedure(ProcedureDecl { name, tab_index, params, block })
        }
    }

    fn analyze_formal_params(&mut self, node: &ParseNode) -> Vec<ParamDecl> {
        node.children
            .iter()
            .filter(|c| c.kind == NonTerminal::ParamGroup)
            .flat_map(|pg| self.analyze_param_group(pg))
            .collect()
    }

    fn analyze_param_group(&mut self, node: &ParseNode) -> Vec<ParamDecl> {
        let ident_list = &node.children[0];
        let (data_type, aref, fields) = self.analyze_type_expr(&node.children[2]);
        let size = if data_type == DataType::Array {
            aref.map(|a| self.table.atab[a].size).unwrap_or(0)
        } else {
            1
        };

        let mut out = Vec::new();
        let mut i = 0;
        while i < ident_list.children.len() {
            let name_tok = leaf_token(&ident_list.children[i]).clone();
            let name = name_tok.symbol();
            if self.table.find_in_current_block(name).is_some() {
                self.error(
                    Code::E_SEMANTIC_DUPLICATE_IDENT,
                    &name_tok,
                    format!("duplicate identifier '{}'", name_tok.lexeme),
                );
            }
            let tab_index = self.table.enter_identifier(name, ObjKind::Variable, data_type, aref, true, size, None);
            if let Some(fields) = &fields {
                self.table.set_record_fields(tab_index, fields.clone());
            }
            out.push(ParamDecl { identifier: name, data_type, tab_index });
            i += 2;
        }
        out
    }

    // ---- statements -------------------------------------------------------

    fn analyze_compound_statement(&mut self, node: &ParseNode) -> Stmt {
        Stmt::Compound(self.analyze_statement_list(&node.children[1]))
    }

    fn analyze_statement_list(&mut self, node: &ParseNode) -> Vec<Stmt> {
        node.children
            .iter()
            .filter(|c| c.kind == NonTerminal::Statement)
            .map(|c| self.analyze_statement(c))
            .collect()
    }

    fn analyze_statement(&mut self, node: &ParseNode) -> Stmt {
        let Some(inner) = node.children.first() else {
            return Stmt::Empty;
        };
        match inner.kind {
            NonTerminal::If => self.analyze_if(inner),
            NonTerminal::While => self.analyze_while(inner),
            NonTerminal::For => self.analyze_for(inner),
            NonTerminal::Repeat => self.analyze_repeat(inner),
            NonTerminal::Case => self.analyze_case(inner),
            NonTerminal::CompoundStatement => self.analyze_compound_statement(inner),
            NonTerminal::ProcCall => self.analyze_proc_call_stmt(inner),
            NonTerminal::Assignment => self.analyze_assignment(inner),
            _ => Stmt::Empty,
        }
    }

    fn analyze_assignment(&mut self, node: &ParseNode) -> Stmt {
        let variable_node = &node.children[0];
        let target = self.analyze_variable(variable_node);
        let value = self.analyze_expression(&node.children[2]);
        let name_tok = leaf_token(&variable_node.children[0]);

        if let Expr::Variable { tab_index: Some(idx), is_array_element: false, field_path, .. } = &target {
            if field_path.is_empty() && matches!(self.table.tab[TabId::from_usize(*idx)].obj, ObjKind::Constant) {
                self.error(
                    Code::E_SEMANTIC_ASSIGN_TO_CONST,
                    name_tok,
                    format!("Cannot assign to constant '{}'", name_tok.lexeme),
                );
            }
        }

        let target_type = target.data_type();
        let value_type = value.data_type();
        if target_type != DataType::Void
            && value_type != DataType::Void
            && !is_assignable(value_type, target_type)
        {
            self.error(
                Code::E_SEMANTIC_ASSIGN_TYPE_MISMATCH,
                name_tok,
                format!("Type mismatch in assignment: cannot assign {} to {}", value_type, target_type),
            );
        }

        Stmt::Assignment { target: Box::new(target), value: Box::new(value) }
    }

    fn analyze_if(&mut self, node: &ParseNode) -> Stmt {
        let cond = self.analyze_expression(&node.children[1]);
        let then_branch = self.analyze_statement(&node.children[3]);
        let else_branch = if node.children.len() > 4 {
            Some(Box::new(self.analyze_statement(&node.children[5])))
        } else {
            None
        };
        Stmt::If { cond: Box::new(cond), then_branch: Box::new(then_branch), else_branch }
    }

    fn analyze_while(&mut self, node: &ParseNode) -> Stmt {
        let cond = self.analyze_expression(&node.children[1]);
        let body = self.analyze_statement(&node.children[3]);
        Stmt::While { cond: Box::new(cond), body: Box::new(body) }
    }

    fn analyze_for(&mut self, node: &ParseNode) -> Stmt {
        let var_tok = leaf_token(&node.children[1]).clone();
        let var = var_tok.symbol();
        let tab_index = self.table.find_identifier(var);
        if tab_index.is_none() {
            self.error(
                Code::E_SEMANTIC_UNDEFINED_IDENT,
                &var_tok,
                format!("undefined identifier '{}'", var_tok.lexeme),
            );
        }
        let from = self.analyze_expression(&node.children[3]);
        let descending = leaf_token(&node.children[4]).lexeme.eq_ignore_ascii_case("turunke");
        let to = self.analyze_expression(&node.children[5]);
        let body = self.analyze_statement(&node.children[7]);
        Stmt::For {
            var,
            tab_index,
            from: Box::new(from),
            to: Box::new(to),
            descending,
            body: Box::new(body),
        }
    }

    fn analyze_repeat(&mut self, node: &ParseNode) -> Stmt {
        let body = self.analyze_statement_list(&node.children[1]);
        let until = self.analyze_expression(&node.children[3]);
        Stmt::Repeat { body, until: Box::new(until) }
    }

    fn analyze_case(&mut self, node: &ParseNode) -> Stmt {
        let selector = self.analyze_expression(&node.children[1]);
        let arms = node.children[3..]
            .iter()
            .filter(|c| c.kind == NonTerminal::CaseElement)
            .map(|c| self.analyze_case_element(c))
            .collect();
        Stmt::Case { selector: Box::new(selector), arms }
    }

    fn analyze_case_element(&mut self, node: &ParseNode) -> CaseArm {
        let mut labels = Vec::new();
        let mut i = 0;
        loop {
            labels.push(self.analyze_const_value_as_expr(&node.children[i]));
            i += 1;
            if node.children[i].token.as_ref().map(|t| t.kind) == Some(TokenKind::Comma) {
                i += 1;
                continue;
            }
            break;
        }
        i += 1; // ':'
        let body = self.analyze_statement(&node.children[i]);
        CaseArm { labels, body: Box::new(body) }
    }

    /// A `<const-value>` used as a `<case-element>` label: a literal, or an
    /// `IDENT` naming either a prior constant or a boolean literal.
    fn analyze_const_value_as_expr(&mut self, leaf: &ParseNode) -> Expr {
        let tok = leaf_token(leaf);
        if tok.kind != TokenKind::Identifier {
            return self.analyze_literal_leaf(leaf);
        }
        if tok.lexeme.eq_ignore_ascii_case("benar") {
            return Expr::Boolean { value: true, identifier: tok.symbol() };
        }
        if tok.lexeme.eq_ignore_ascii_case("salah") {
            return Expr::Boolean { value: false, identifier: tok.symbol() };
        }
        let tab_index = self.table.find_identifier(tok.symbol());
        if tab_index.is_none() {
            self.error(
                Code::E_SEMANTIC_UNDEFINED_IDENT,
                tok,
                format!("undefined identifier '{}'", tok.lexeme),
            );
        }
        let data_type = tab_index.map(|i| self.table.tab[TabId::from_usize(i)].data_type).unwrap_or(DataType::Void);
        Expr::Variable {
            identifier: tok.symbol(),
            tab_index,
            data_type,
            array_index_exprs: Vec::new(),
            is_array_element: false,
            field_path: Vec::new(),
        }
    }

    fn analyze_proc_call_stmt(&mut self, node: &ParseNode) -> Stmt {
        let name_tok = leaf_token(&node.children[0]).clone();
        let name = name_tok.symbol();
        let tab_index = self.table.find_identifier(name);
        let args: Vec<Expr> = node
            .children
            .iter()
            .filter(|c| c.kind == NonTerminal::Expression)
            .map(|c| self.analyze_expression(c))
            .collect();

        match tab_index {
            None => self.error(
                Code::E_SEMANTIC_UNDEFINED_IDENT,
                &name_tok,
                format!("undefined identifier '{}'", name_tok.lexeme),
            ),
            Some(idx) => self.check_call(&name_tok, idx, &args),
        }

        Stmt::ProcedureCall { name, tab_index, args }
    }

    /// Arity and per-position parameter-type checks (§4.4.4). Built-in
    /// I/O procedures (`tab` index below the user prefix) accept any
    /// argument list.
    fn check_call(&self, name_tok: &Token, idx: usize, args: &[Expr]) {
        if idx < SymbolTable::USER_ID_START {
            return;
        }
        let Some(block_index) = self.table.tab[TabId::from_usize(idx)].block_index else {
            return;
        };
        let params = self.table.collect_parameters(block_index);
        if params.len() != args.len() {
            self.error(
                Code::E_SEMANTIC_ARITY_MISMATCH,
                name_tok,
                format!(
                    "Parameter count mismatch in {}: expected {}, got {}",
                    name_tok.lexeme,
                    params.len(),
                    args.len()
                ),
            );
            return;
        }
        for (param_idx, arg) in params.iter().zip(args.iter()) {
            let param_type = self.table.tab[TabId::from_usize(*param_idx)].data_type;
            let arg_type = arg.data_type();
            if !is_param_assignable(arg_type, param_type) {
                self.error(
                    Code::E_SEMANTIC_PARAM_TYPE_MISMATCH,
                    name_tok,
                    format!(
                        "Parameter type mismatch in {}: expected {}, got {}",
                        name_tok.lexeme, param_type, arg_type
                    ),
                );
            }
        }
    }

    // ---- variable references -------------------------------------------------------

    /// `<variable> ::= IDENT {'.' IDENT | '[' <expression> {',' <expression>} ']'}`.
    /// Peels one `atab` dimension per bracket-group index expression;
    /// `.field` continuations only ever extend `field_path` (§4.4.5 —
    /// record fields are not themselves type-resolved).
    fn analyze_variable(&mut self, node: &ParseNode) -> Expr {
        let name_tok = leaf_token(&node.children[0]).clone();
        let name = name_tok.symbol();
        let tab_index = self.table.find_identifier(name);
        if tab_index.is_none() {
            self.error(
                Code::E_SEMANTIC_UNDEFINED_IDENT,
                &name_tok,
                format!("undefined identifier '{}'", name_tok.lexeme),
            );
        }

        let mut current_type = tab_index
            .map(|i| self.table.tab[TabId::from_usize(i)].data_type)
            .unwrap_or(DataType::Void);
        let mut current_aref = tab_index.and_then(|i| self.table.tab[TabId::from_usize(i)].reference);
        let mut field_path = Vec::new();
        let mut array_index_exprs = Vec::new();
        let mut is_array_element = false;
        let mut reported_not_array = false;

        let mut i = 1;
        while i < node.children.len() {
            if node.children[i].token.as_ref().map(|t| t.kind) == Some(TokenKind::Dot) {
                field_path.push(leaf_token(&node.children[i + 1]).symbol());
                i += 2;
                continue;
            }

            // '[' <expression> {',' <expression>} ']'
            i += 1;
            loop {
                let index_expr = self.analyze_expression(&node.children[i]);

                if current_type != DataType::Array {
                    if !reported_not_array {
                        self.error(
                            Code::E_SEMANTIC_NOT_AN_ARRAY,
                            &name_tok,
                            format!("'{}' is not an array", name_tok.lexeme),
                        );
                        reported_not_array = true;
                    }
                } else if let Some(aid) = current_aref {
                    if let Some(folded) = evaluate_constant_expression(&node.children[i], &self.table) {
                        let (low, high) = (self.table.atab[aid].low, self.table.atab[aid].high);
                        if folded < low || folded > high {
                            self.error(
                                Code::E_SEMANTIC_INDEX_OUT_OF_BOUNDS,
                                &name_tok,
                                format!("array index {} out of bounds [{}, {}]", folded, low, high),
                            );
                        }
                    }
                    let entry = &self.table.atab[aid];
                    current_type = entry.element_type;
                    current_aref = entry.eref;
                }

                is_array_element = true;
                array_index_exprs.push(index_expr);
                i += 1;
                if node.children[i].token.as_ref().map(|t| t.kind) == Some(TokenKind::Comma) {
                    i += 1;
                    continue;
                }
                break;
            }
            i += 1; // ']'
        }

        Expr::Variable { identifier: name, tab_index, data_type: current_type, array_index_exprs, is_array_element, field_path }
    }

    /// `benar`/`salah` lex as plain identifiers (they are not in the
    /// reserved prefix), so a bare single-leaf `<variable>` matching
    /// either spelling case-insensitively is a boolean literal, not an
    /// identifier lookup.
    fn analyze_variable_or_boolean(&mut self, node: &ParseNode) -> Expr {
        if node.children.len() == 1 && node.children[0].is_leaf() {
            let tok = leaf_token(&node.children[0]);
            if tok.lexeme.eq_ignore_ascii_case("benar") {
                return Expr::Boolean { value: true, identifier: tok.symbol() };
            }
            if tok.lexeme.eq_ignore_ascii_case("salah") {
                return Expr::Boolean { value: false, identifier: tok.symbol() };
            }
        }
        self.analyze_variable(node)
    }

    fn analyze_function_call(&mut self, node: &ParseNode) -> Expr {
        let name_tok = leaf_token(&node.children[0]).clone();
        let name = name_tok.symbol();
        let tab_index = self.table.find_identifier(name);
        let args: Vec<Expr> = node
            .children
            .iter()
            .filter(|c| c.kind == NonTerminal::Expression)
            .map(|c| self.analyze_expression(c))
            .collect();

        match tab_index {
            None => self.error(
                Code::E_SEMANTIC_UNDEFINED_IDENT,
                &name_tok,
                format!("undefined identifier '{}'", name_tok.lexeme),
            ),
            Some(idx) => self.check_call(&name_tok, idx, &args),
        }

        let data_type = tab_index.map(|i| self.table.tab[TabId::from_usize(i)].data_type).unwrap_or(DataType::Void);
        Expr::FunctionCall { name, tab_index, args, data_type }
    }

    // ---- expressions -------------------------------------------------------

    fn analyze_expression(&mut self, node: &ParseNode) -> Expr {
        let left = self.analyze_simple_expression(&node.children[0]);
        if node.children.len() == 1 {
            return left;
        }
        let op_tok = leaf_token(&node.children[1]).clone();
        let right = self.analyze_simple_expression(&node.children[2]);
        self.build_binary(op_tok, left, right)
    }

    fn analyze_simple_expression(&mut self, node: &ParseNode) -> Expr {
        let mut i = 0;
        let sign = node.children[0].token.as_ref().filter(|t| t.lexeme == "+" || t.lexeme == "-").cloned();
        if sign.is_some() {
            i = 1;
        }

        let mut acc = self.analyze_term(&node.children[i]);
        i += 1;
        if let Some(sign_tok) = sign {
            let negative = sign_tok.lexeme == "-";
            let data_type = acc.data_type();
            acc = Expr::UnaryExpression { negative, operand: Box::new(acc), data_type };
        }

        while i < node.children.len() {
            let op_tok = leaf_token(&node.children[i]).clone();
            let rhs = self.analyze_term(&node.children[i + 1]);
            acc = self.build_binary(op_tok, acc, rhs);
            i += 2;
        }
        acc
    }

    fn analyze_term(&mut self, node: &ParseNode) -> Expr {
        let mut acc = self.analyze_factor(&node.children[0]);
        let mut i = 1;
        while i < node.children.len() {
            let op_tok = leaf_token(&node.children[i]).clone();
            let rhs = self.analyze_factor(&node.children[i + 1]);
            acc = self.build_binary(op_tok, acc, rhs);
            i += 2;
        }
        acc
    }

    fn analyze_factor(&mut self, node: &ParseNode) -> Expr {
        match node.children.as_slice() {
            [leaf] if leaf.is_leaf() => self.analyze_literal_leaf(leaf),
            [not_tok, operand] if not_tok.is_leaf() => {
                Expr::NotExpression { operand: Box::new(self.analyze_factor(operand)) }
            }
            [lparen, inner, _rparen] if lparen.is_leaf() => self.analyze_expression(inner),
            [single] if single.kind == NonTerminal::ProcCall => self.analyze_function_call(single),
            [single] if single.kind == NonTerminal::Variable => self.analyze_variable_or_boolean(single),
            _ => Expr::Error,
        }
    }

    fn analyze_literal_leaf(&mut self, leaf: &ParseNode) -> Expr {
        let tok = leaf_token(leaf);
        match tok.kind {
            TokenKind::Number => {
                if tok.lexeme.contains('.') {
                    Expr::Number {
                        value: NumberValue::Real(tok.lexeme.parse().unwrap_or(0.0)),
                        data_type: DataType::Real,
                    }
                } else {
                    Expr::Number {
                        value: NumberValue::Int(tok.lexeme.parse().unwrap_or(0)),
                        data_type: DataType::Integer,
                    }
                }
            }
            TokenKind::StringLiteral | TokenKind::CharLiteral => {
                let content = unescape_pascal_string(&tok.lexeme);
                if content.chars().count() == 1 {
                    Expr::Char { value: content.chars().next().unwrap_or('\0') }
                } else {
                    Expr::String { value: content }
                }
            }
            _ => Expr::Error,
        }
    }

    /// Classify and type-check one binary operator application (§4.4.3):
    /// arithmetic widens to `REAL`, relational always yields `BOOLEAN`
    /// (either identical operand types or both numeric), logical requires
    /// both operands `BOOLEAN` (or already-erroneous `VOID`, to avoid
    /// cascading a diagnostic onto a subtree that already has one).
    fn build_binary(&self, op_tok: Token, left: Expr, right: Expr) -> Expr {
        let Some(op) = BinOp::from_lexeme(&op_tok.lexeme) else {
            return Expr::Error;
        };
        let left_type = left.data_type();
        let right_type = right.data_type();
        let either_void = left_type == DataType::Void || right_type == DataType::Void;

        let data_type = if op.is_arithmetic() {
            let result = arithmetic_result_type(left_type, right_type);
            if result == DataType::Void && !either_void {
                self.error(
                    Code::E_SEMANTIC_BINARY_TYPE_MISMATCH,
                    &op_tok,
                    format!("Type mismatch in binary expression: cannot apply '{}' to {} and {}", op_tok.lexeme, left_type, right_type),
                );
            }
            result
        } else if op.is_relational() {
            let compatible = left_type == right_type || (left_type.is_numeric() && right_type.is_numeric());
            if !compatible && !either_void {
                self.error(
                    Code::E_SEMANTIC_BINARY_TYPE_MISMATCH,
                    &op_tok,
                    format!("Type mismatch in binary expression: cannot compare {} and {}", left_type, right_type),
                );
            }
            DataType::Boolean
        } else {
            let compatible = matches!(left_type, DataType::Boolean | DataType::Void)
                && matches!(right_type, DataType::Boolean | DataType::Void);
            if !compatible {
                self.error(
                    Code::E_SEMANTIC_BINARY_TYPE_MISMATCH,
                    &op_tok,
                    format!("Type mismatch in binary expression: cannot apply '{}' to {} and {}", op_tok.lexeme, left_type, right_type),
                );
            }
            DataType::Boolean
        };

        Expr::BinaryExpression { op, left: Box::new(left), right: Box::new(right), data_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idpasc_lex::Lexer;
    use idpasc_util::Handler as LexHandler;

    fn analyze_source(source: &str) -> AnalysisOutput {
        let handler = LexHandler::new();
        let tokens = Lexer::tokenize(source, &handler);
        let tree = idpasc_par::parse(tokens).expect("source must parse");
        analyze(&tree)
    }

    #[test]
    fn constant_declaration_enters_a_tab_row_with_its_folded_type() {
        let out = analyze_source("program p; konstanta n = 5; mulai selesai.");
        assert!(out.errors.is_empty());
        let row = &out.table.tab[TabId::from_usize(SymbolTable::USER_ID_START)];
        assert_eq!(row.data_type, DataType::Integer);
        assert!(matches!(row.obj, ObjKind::Constant));
    }

    #[test]
    fn a_declared_variable_resolves_in_its_own_block() {
        let out = analyze_source("program p; variabel x: integer; mulai x := 5 selesai.");
        assert!(out.errors.is_empty());
        if let Stmt::Compound(stmts) = &out.ast.body {
            assert!(matches!(stmts[0], Stmt::Assignment { .. }));
        } else {
            panic!("expected a compound body");
        }
    }

    #[test]
    fn inner_block_variable_shadows_the_outer_one() {
        let source = "program p; variabel x: integer; \
                      prosedur q; variabel x: real; mulai x := 1.5 selesai; \
                      mulai x := 1 selesai.";
        let out = analyze_source(source);
        assert!(out.errors.is_empty());
    }

    #[test]
    fn assigning_a_real_to_an_integer_variable_is_a_type_mismatch() {
        let source = "program p; variabel x: integer; variabel y: real; mulai x := y selesai.";
        let out = analyze_source(source);
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].contains("Type mismatch in assignment: cannot assign REAL to INTEGER"));
    }

    #[test]
    fn assigning_to_a_constant_is_rejected() {
        let source = "program p; konstanta c = 1; mulai c := 2 selesai.";
        let out = analyze_source(source);
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].contains("Cannot assign to constant 'c'"));
    }

    #[test]
    fn calling_a_procedure_with_the_wrong_number_of_arguments_is_an_arity_mismatch() {
        let source = "program p; prosedur q(a: integer); mulai selesai; mulai q(1, 2) selesai.";
        let out = analyze_source(source);
        assert_eq!(out.errors.len(), 1);
        assert!(out.errors[0].contains("Parameter count mismatch in q: expected 1, got 2"));
    }

    #[test]
    fn undeclared_identifiers_are_reported_but_do_not_abort_the_walk() {
        let source = "program p; mulai tidak_ada := 1; juga_tidak := 2 selesai.";
        let out = analyze_source(source);
        assert_eq!(out.errors.len(), 2);
        assert!(out.errors[0].contains("undefined identifier 'tidak_ada'"));
    }

    #[test]
    fn indexing_a_non_array_variable_is_rejected() {
        let source = "program p; variabel x: integer; variabel y: integer; mulai y := x[1] selesai.";
        let out = analyze_source(source);
        assert!(out.errors.iter().any(|e| e.contains("'x' is not an array")));
    }

    #[test]
    fn a_statically_out_of_bounds_index_is_reported() {
        let source = "program p; variabel a: larik[1..5] dari integer; variabel x: integer; mulai x := a[9] selesai.";
        let out = analyze_source(source);
        assert!(out.errors.iter().any(|e| e.contains("array index 9 out of bounds [1, 5]")));
    }

    #[test]
    fn a_reversed_array_range_is_an_invalid_bounds_error() {
        let source = "program p; variabel a: larik[10..1] dari integer; mulai selesai.";
        let out = analyze_source(source);
        assert!(out.errors.iter().any(|e| e.contains("invalid array bounds: low 10 > high 1")));
    }

    #[test]
    fn boolean_literals_are_not_undefined_identifiers() {
        let source = "program p; variabel x: boolean; mulai x := benar selesai.";
        let out = analyze_source(source);
        assert!(out.errors.is_empty());
    }

    #[test]
    fn function_return_value_participates_in_an_arithmetic_expression() {
        let source = "program p; fungsi f: integer; mulai selesai; \
                      variabel x: integer; mulai x := f() + 1 selesai.";
        let out = analyze_source(source);
        assert!(out.errors.is_empty());
    }
}
