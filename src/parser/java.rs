//! Java syntax tree lowering
//!
//! Parses (preprocessed) Java source with tree-sitter and lowers it into the
//! source model: class declarations with fields, methods, constructors and
//! nested types; per-method flattened statement sequences, call expressions
//! and an NCSS statement metric.
//!
//! Missing expected substructure (a call without a name node, a method
//! without a body) is skipped, never propagated: the lowering always yields
//! as much of the unit as the tree supports.

use crate::error::SketchError;
use crate::model::{
    CallExpr, ClassDecl, LineMap, MethodDecl, MethodId, Qualifier, SketchUnit, Span, Stmt,
    StmtKind, VarDecl,
};
use tree_sitter::Node;

/// Parser for Java compilation units.
pub struct JavaParser {
    parser: tree_sitter::Parser,
    next_id: u32,
}

impl JavaParser {
    pub fn new() -> Result<Self, SketchError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| SketchError::parse("java grammar", e.to_string()))?;
        Ok(Self { parser, next_id: 0 })
    }

    /// Parse one unit of (preprocessed) source into the model.
    pub fn parse_unit(
        &mut self,
        name: &str,
        source: &str,
        line_map: LineMap,
    ) -> Result<SketchUnit, SketchError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| SketchError::parse(name, "tree-sitter returned no tree"))?;

        let root = tree.root_node();
        let mut classes = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if matches!(child.kind(), "class_declaration" | "interface_declaration") {
                if let Some(class) = self.lower_class(child, source) {
                    classes.push(class);
                }
            }
        }

        Ok(SketchUnit {
            name: name.to_string(),
            classes,
            line_map,
        })
    }

    fn fresh_id(&mut self) -> MethodId {
        let id = MethodId(self.next_id);
        self.next_id += 1;
        id
    }

    fn lower_class(&mut self, node: Node, src: &str) -> Option<ClassDecl> {
        let name = text(node.child_by_field_name("name")?, src).to_string();
        let mut class = ClassDecl {
            name,
            is_interface: node.kind() == "interface_declaration",
            is_abstract: has_modifier(node, src, "abstract"),
            fields: Vec::new(),
            methods: Vec::new(),
            nested: Vec::new(),
            span: span(node),
        };

        let body = node.child_by_field_name("body")?;
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    lower_field(member, src, &mut class.fields);
                }
                "method_declaration" => {
                    if let Some(m) = self.lower_method(member, src, false) {
                        class.methods.push(m);
                    }
                }
                "constructor_declaration" => {
                    if let Some(m) = self.lower_method(member, src, true) {
                        class.methods.push(m);
                    }
                }
                "class_declaration" | "interface_declaration" => {
                    if let Some(nested) = self.lower_class(member, src) {
                        class.nested.push(nested);
                    }
                }
                _ => {}
            }
        }

        Some(class)
    }

    fn lower_method(&mut self, node: Node, src: &str, is_constructor: bool) -> Option<MethodDecl> {
        let name_node = node.child_by_field_name("name")?;
        let result_span = if is_constructor {
            span(name_node)
        } else {
            node.child_by_field_name("type")
                .map(span)
                .unwrap_or_else(|| span(name_node))
        };

        let mut method = MethodDecl {
            id: self.fresh_id(),
            name: text(name_node, src).to_string(),
            is_constructor,
            params: Vec::new(),
            locals: Vec::new(),
            statements: Vec::new(),
            calls: Vec::new(),
            ncss: 0,
            span: span(node),
            result_span,
        };

        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            for param in params.named_children(&mut cursor) {
                if !matches!(param.kind(), "formal_parameter" | "spread_parameter") {
                    continue;
                }
                let Some(name) = param.child_by_field_name("name") else {
                    continue;
                };
                let type_name = param
                    .child_by_field_name("type")
                    .map(|t| base_type_name(text(t, src)))
                    .unwrap_or_default();
                method.params.push(VarDecl {
                    name: text(name, src).to_string(),
                    type_name,
                    span: span(name),
                });
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            // the declaration itself counts as one source statement
            method.ncss = 1;
            lower_block(body, src, &mut method);
        }

        Some(method)
    }
}

fn lower_block(node: Node, src: &str, method: &mut MethodDecl) {
    let mut cursor = node.walk();
    for stmt in node.named_children(&mut cursor) {
        lower_statement(stmt, src, method);
    }
}

fn lower_statement(node: Node, src: &str, method: &mut MethodDecl) {
    match node.kind() {
        "block" => lower_block(node, src, method),
        "local_variable_declaration" => {
            method.ncss += 1;
            lower_local(node, src, method);
        }
        "expression_statement" => {
            method.ncss += 1;
            let Some(expr) = node.named_child(0) else {
                return;
            };
            let kind = match expr.kind() {
                "assignment_expression" => expr
                    .child_by_field_name("left")
                    .map(|left| StmtKind::Assign {
                        target: text(left, src).to_string(),
                    })
                    .unwrap_or(StmtKind::Other),
                "update_expression" => expr
                    .named_child(0)
                    .map(|operand| StmtKind::IncDec {
                        target: text(operand, src).to_string(),
                    })
                    .unwrap_or(StmtKind::Other),
                "method_invocation" => lower_call(expr, src)
                    .map(StmtKind::Call)
                    .unwrap_or(StmtKind::Other),
                _ => StmtKind::Other,
            };
            method.statements.push(Stmt {
                span: span(node),
                kind,
            });
            collect_calls(expr, src, &mut method.calls);
        }
        "if_statement" => {
            method.ncss += 1;
            if let Some(cond) = node.child_by_field_name("condition") {
                collect_calls(cond, src, &mut method.calls);
            }
            if let Some(consequence) = node.child_by_field_name("consequence") {
                lower_statement(consequence, src, method);
            }
            if let Some(alternative) = node.child_by_field_name("alternative") {
                method.ncss += 1;
                lower_statement(alternative, src, method);
            }
        }
        "while_statement" => {
            method.ncss += 1;
            if let Some(cond) = node.child_by_field_name("condition") {
                collect_calls(cond, src, &mut method.calls);
            }
            if let Some(body) = node.child_by_field_name("body") {
                lower_statement(body, src, method);
            }
        }
        "do_statement" => {
            method.ncss += 1;
            if let Some(body) = node.child_by_field_name("body") {
                lower_statement(body, src, method);
            }
            if let Some(cond) = node.child_by_field_name("condition") {
                collect_calls(cond, src, &mut method.calls);
            }
        }
        "for_statement" => {
            method.ncss += 1;
            let body = node.child_by_field_name("body");
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if body.is_some_and(|b| b == child) {
                    lower_statement(child, src, method);
                } else if child.kind() == "local_variable_declaration" {
                    lower_local(child, src, method);
                } else {
                    collect_calls(child, src, &mut method.calls);
                }
            }
        }
        "enhanced_for_statement" => {
            method.ncss += 1;
            if let Some(name) = node.child_by_field_name("name") {
                let type_name = node
                    .child_by_field_name("type")
                    .map(|t| base_type_name(text(t, src)))
                    .unwrap_or_default();
                method.locals.push(VarDecl {
                    name: text(name, src).to_string(),
                    type_name,
                    span: span(name),
                });
            }
            if let Some(value) = node.child_by_field_name("value") {
                collect_calls(value, src, &mut method.calls);
            }
            if let Some(body) = node.child_by_field_name("body") {
                lower_statement(body, src, method);
            }
        }
        "switch_expression" => {
            method.ncss += 1;
            if let Some(cond) = node.child_by_field_name("condition") {
                collect_calls(cond, src, &mut method.calls);
            }
            if let Some(body) = node.child_by_field_name("body") {
                let mut cursor = body.walk();
                for group in body.named_children(&mut cursor) {
                    let mut inner = group.walk();
                    for child in group.named_children(&mut inner) {
                        if child.kind() != "switch_label" {
                            lower_statement(child, src, method);
                        }
                    }
                }
            }
        }
        "try_statement" | "try_with_resources_statement" => {
            method.ncss += 1;
            if let Some(body) = node.child_by_field_name("body") {
                lower_block(body, src, method);
            }
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "catch_clause" => {
                        method.ncss += 1;
                        if let Some(body) = child.child_by_field_name("body") {
                            lower_block(body, src, method);
                        }
                    }
                    "finally_clause" => {
                        method.ncss += 1;
                        let mut inner = child.walk();
                        for block in child.named_children(&mut inner) {
                            if block.kind() == "block" {
                                lower_block(block, src, method);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        "synchronized_statement" => {
            method.ncss += 1;
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "block" {
                    lower_block(child, src, method);
                }
            }
        }
        "labeled_statement" => {
            method.ncss += 1;
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() != "identifier" {
                    lower_statement(child, src, method);
                }
            }
        }
        "return_statement" | "throw_statement" | "break_statement" | "continue_statement"
        | "assert_statement" | "yield_statement" => {
            method.ncss += 1;
            collect_calls(node, src, &mut method.calls);
        }
        _ => {
            collect_calls(node, src, &mut method.calls);
        }
    }
}

fn lower_local(node: Node, src: &str, method: &mut MethodDecl) {
    let type_name = node
        .child_by_field_name("type")
        .map(|t| base_type_name(text(t, src)))
        .unwrap_or_default();
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        if let Some(name) = declarator.child_by_field_name("name") {
            method.locals.push(VarDecl {
                name: text(name, src).to_string(),
                type_name: type_name.clone(),
                span: span(name),
            });
        }
        if let Some(value) = declarator.child_by_field_name("value") {
            collect_calls(value, src, &mut method.calls);
        }
    }
}

fn lower_field(node: Node, src: &str, fields: &mut Vec<VarDecl>) {
    let type_name = node
        .child_by_field_name("type")
        .map(|t| base_type_name(text(t, src)))
        .unwrap_or_default();
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        if let Some(name) = declarator.child_by_field_name("name") {
            fields.push(VarDecl {
                name: text(name, src).to_string(),
                type_name: type_name.clone(),
                span: span(name),
            });
        }
    }
}

/// Collect every call expression under `node`, outermost first.
fn collect_calls(node: Node, src: &str, out: &mut Vec<CallExpr>) {
    if node.kind() == "method_invocation" {
        if let Some(call) = lower_call(node, src) {
            out.push(call);
        }
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_calls(child, src, out);
    }
}

fn lower_call(node: Node, src: &str) -> Option<CallExpr> {
    let name = node.child_by_field_name("name")?;
    // an expression without an argument-list suffix is not a call
    let args = node.child_by_field_name("arguments")?;

    let mut literal_args = Vec::new();
    let mut cursor = args.walk();
    for arg in args.named_children(&mut cursor) {
        literal_args.push(is_literal(arg));
    }

    let qualifier = match node.child_by_field_name("object") {
        None => Qualifier::Implicit,
        Some(object) => match object.kind() {
            "this" => Qualifier::This,
            "super" => Qualifier::Super,
            _ => Qualifier::Named(text(object, src).to_string()),
        },
    };

    Some(CallExpr {
        name: text(name, src).to_string(),
        qualifier,
        literal_args,
        span: span(node),
    })
}

fn is_literal(node: Node) -> bool {
    matches!(
        node.kind(),
        "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "string_literal"
            | "character_literal"
            | "true"
            | "false"
            | "null_literal"
    )
}

fn has_modifier(node: Node, src: &str, modifier: &str) -> bool {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifiers" && text(child, src).contains(modifier) {
            return true;
        }
    }
    false
}

/// Strip generic arguments and array brackets from a declared type.
fn base_type_name(raw: &str) -> String {
    let end = raw
        .find(|c: char| c == '<' || c == '[')
        .unwrap_or(raw.len());
    raw[..end].trim().to_string()
}

fn text<'a>(node: Node, src: &'a str) -> &'a str {
    node.utf8_text(src.as_bytes()).unwrap_or("")
}

fn span(node: Node) -> Span {
    let start = node.start_position();
    Span {
        line: start.row + 1,
        column: start.column + 1,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    }
}
