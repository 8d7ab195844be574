//! Source model for one compilation unit
//!
//! An owned projection of the parsed syntax tree: top-level classes with
//! their fields, methods, constructors and nested types, plus the flattened
//! statement/call views the detectors walk. The model is built once per unit
//! by the parser and read-only afterwards; detectors never mutate it.
//!
//! Statement and expression shapes are a closed variant set (call,
//! assignment, increment/decrement, other) rather than a full AST: the
//! detectors only reason about straight-line statement order and static call
//! targets.

use std::collections::HashSet;
use std::path::PathBuf;

/// Position of a node inside the (preprocessed) unit source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// 1-based line in the combined unit source.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// A resolved position in an original source file (after tab mapping).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

/// Maps lines of a combined, wrapped unit back to the original tabs.
///
/// Sketch folders concatenate all `.pde` tabs and wrap them in a synthetic
/// class header, so a diagnostic's line number has to be translated back to
/// the tab it came from. Plain `.java` units use a single unshifted segment.
#[derive(Debug, Clone, Default)]
pub struct LineMap {
    header_lines: usize,
    segments: Vec<(PathBuf, usize)>,
}

impl LineMap {
    /// Identity map for a unit parsed from a single unwrapped file.
    pub fn single(file: PathBuf) -> Self {
        Self {
            header_lines: 0,
            segments: vec![(file, usize::MAX)],
        }
    }

    /// Map for a wrapped sketch: `tabs` lists each tab with its line count.
    pub fn wrapped(tabs: Vec<(PathBuf, usize)>, header_lines: usize) -> Self {
        Self {
            header_lines,
            segments: tabs,
        }
    }

    /// Translate a line of the combined source to (file, line).
    ///
    /// Lines inside the synthetic header or trailer clamp to the nearest
    /// tab edge so every span resolves somewhere sensible.
    pub fn resolve(&self, line: usize, column: usize) -> Location {
        let mut rel = line.saturating_sub(self.header_lines);
        if rel == 0 {
            rel = 1;
        }
        for (file, len) in &self.segments {
            if rel <= *len {
                return Location {
                    file: file.clone(),
                    line: rel,
                    column,
                };
            }
            rel -= len;
        }
        match self.segments.last() {
            Some((file, len)) => Location {
                file: file.clone(),
                line: *len,
                column,
            },
            None => Location {
                file: PathBuf::new(),
                line,
                column,
            },
        }
    }
}

/// Identifies a method within one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub u32);

/// A named variable declaration: field, parameter or local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: String,
    pub type_name: String,
    pub span: Span,
}

/// Receiver form of a call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// Bare call: `ellipse(...)`.
    Implicit,
    /// `this.ellipse(...)`.
    This,
    /// `super.draw(...)`.
    Super,
    /// Any other receiver expression, stored as source text.
    Named(String),
}

/// A call expression with an argument list.
///
/// Expressions without an argument-list suffix (field accesses, incomplete
/// expressions) are never lowered into a `CallExpr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub name: String,
    pub qualifier: Qualifier,
    /// Per-argument flag: the argument is a bare literal.
    pub literal_args: Vec<bool>,
    pub span: Span,
}

impl CallExpr {
    pub fn arg_count(&self) -> usize {
        self.literal_args.len()
    }

    /// First segment of a named receiver (`p.pos.x` -> `p`).
    pub fn qualifier_base(&self) -> Option<&str> {
        match &self.qualifier {
            Qualifier::Named(text) => {
                let end = text
                    .find(|c: char| c == '.' || c == '[' || c == '(')
                    .unwrap_or(text.len());
                Some(&text[..end])
            }
            _ => None,
        }
    }
}

/// One statement of interest inside a method body, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub span: Span,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StmtKind {
    /// Expression statement whose expression is a call.
    Call(CallExpr),
    /// Plain or compound assignment; target is the left-hand source text.
    Assign { target: String },
    /// Increment/decrement; target is the operand source text.
    IncDec { target: String },
    /// Any other expression statement.
    Other,
}

impl Stmt {
    /// Mutation target for assignment-like statements.
    pub fn mutation_target(&self) -> Option<&str> {
        match &self.kind {
            StmtKind::Assign { target } | StmtKind::IncDec { target } => Some(target),
            _ => None,
        }
    }
}

/// Reduce a mutation target to its base identifier.
///
/// A leading `this.` receiver is stripped first, since `this.x` still
/// mutates the field `x`; any remaining dotted or indexed expression reduces
/// to its first segment.
pub fn mutation_base_name(target: &str) -> &str {
    let target = target.trim();
    let target = target.strip_prefix("this.").unwrap_or(target);
    let end = target
        .find(|c: char| c == '.' || c == '[' || c.is_whitespace())
        .unwrap_or(target.len());
    &target[..end]
}

/// A method or constructor declaration.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub id: MethodId,
    pub name: String,
    pub is_constructor: bool,
    pub params: Vec<VarDecl>,
    /// Every local variable declared anywhere in the body.
    pub locals: Vec<VarDecl>,
    /// Expression statements of the body, flattened in document order.
    pub statements: Vec<Stmt>,
    /// Every call expression in the body, in document order.
    pub calls: Vec<CallExpr>,
    /// Non-commenting source statement count (declaration included).
    pub ncss: usize,
    pub span: Span,
    /// The result-type node for methods, the name for constructors; anchor
    /// for method-level diagnostics.
    pub result_span: Span,
}

impl MethodDecl {
    /// Display label: constructors are reported as "Constructor".
    pub fn display_name(&self) -> &str {
        if self.is_constructor {
            "Constructor"
        } else {
            &self.name
        }
    }

    /// Names declared in this method's own scope (parameters and locals).
    pub fn declared_names(&self) -> HashSet<&str> {
        self.params
            .iter()
            .chain(self.locals.iter())
            .map(|v| v.name.as_str())
            .collect()
    }

    /// Declared type of a parameter or local, if the name is one.
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .chain(self.locals.iter())
            .find(|v| v.name == name)
            .map(|v| v.type_name.as_str())
    }
}

/// A class or interface declaration.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub fields: Vec<VarDecl>,
    pub methods: Vec<MethodDecl>,
    pub nested: Vec<ClassDecl>,
    pub span: Span,
}

impl ClassDecl {
    pub fn field_names(&self) -> HashSet<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Declared type of a field, if the name is one.
    pub fn field_type(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.type_name.as_str())
    }

    /// All methods with the given simple name (overloads included).
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDecl> {
        self.methods
            .iter()
            .filter(move |m| !m.is_constructor && m.name == name)
    }

    /// The per-frame render callback, identified by its fixed signature.
    pub fn draw_method(&self) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|m| !m.is_constructor && m.name == crate::catalog::DRAW_METHOD && m.params.is_empty())
    }
}

/// Pre-order walk of a class and its nested types.
pub fn classes_in(top: &ClassDecl) -> Vec<&ClassDecl> {
    let mut out = Vec::new();
    let mut stack = vec![top];
    while let Some(class) = stack.pop() {
        out.push(class);
        for nested in class.nested.iter().rev() {
            stack.push(nested);
        }
    }
    out
}

/// One parsed compilation unit.
#[derive(Debug, Clone)]
pub struct SketchUnit {
    /// Sketch or file name, for logging and parse errors.
    pub name: String,
    /// Top-level type declarations.
    pub classes: Vec<ClassDecl>,
    pub line_map: LineMap,
}

impl SketchUnit {
    /// Resolve a span to the original file and line.
    pub fn location(&self, span: Span) -> Location {
        self.line_map.resolve(span.line, span.column)
    }
}

/// Read-only view of the declarations visible from one method scope.
///
/// Backs the matcher's shadowing checks: a bare name that resolves to any
/// visible variable declaration is user state, not a built-in call.
pub struct ScopeView<'a> {
    globals: HashSet<&'a str>,
    class_fields: HashSet<&'a str>,
    locals: HashSet<&'a str>,
    top_level: bool,
}

impl<'a> ScopeView<'a> {
    pub fn new(top: &'a ClassDecl, class: &'a ClassDecl, method: &'a MethodDecl) -> Self {
        let top_level = std::ptr::eq(top, class);
        Self {
            globals: top.field_names(),
            class_fields: class.field_names(),
            locals: method.declared_names(),
            top_level,
        }
    }

    /// Whether the call site sits in the top-level type's own scope.
    pub fn in_top_level(&self) -> bool {
        self.top_level
    }

    /// Whether `name` resolves to a visible variable declaration.
    pub fn resolves(&self, name: &str) -> bool {
        self.locals.contains(name) || self.class_fields.contains(name) || self.globals.contains(name)
    }
}
