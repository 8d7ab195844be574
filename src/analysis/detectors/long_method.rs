//! Long Method Detector
//!
//! Detects methods that exceed a statement budget, with one concession to
//! how sketches are written: a contiguous block of drawing-primitive calls
//! expresses a single shape, so the block counts as one line. A hand-drawn
//! polygon from thirty vertex() calls should not read as a thirty-line
//! method.
//!
//! ## Anti-Pattern
//!
//! ```java
//! void draw() {
//!     // 80 statements of update logic, collision handling,
//!     // input polling and rendering in one body
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - Hard to understand at a glance
//! - Often indicates multiple responsibilities
//! - Difficult to test individual logic
//!
//! ## Better Alternatives
//!
//! - Extract smaller, focused methods
//! - One method per conceptual drawing pass
//!
//! The metric is a non-commenting source statement count. For each maximal
//! run of consecutive drawing-primitive call statements the count is
//! reduced by the run length minus one (the first call of a run stands for
//! the whole block). An assignment ends a run even when drawing calls
//! resume after it, and a lone drawing call earns no reduction.

use super::Detector;
use crate::analysis::{matcher, sort_by_location, Smell, SmellIssue};
use crate::catalog::builtins;
use crate::model::{classes_in, ScopeView, SketchUnit, Stmt, StmtKind};

/// Detector for methods that are too long
pub struct LongMethodDetector {
    /// Maximum allowed statement count per method
    max_statements: usize,
}

impl LongMethodDetector {
    pub fn new() -> Self {
        Self { max_statements: 50 }
    }

    /// Set maximum statements before warning
    pub fn with_max_statements(mut self, max: usize) -> Self {
        self.max_statements = max;
        self
    }

    /// Statement-count reduction earned by merged drawing blocks.
    ///
    /// Offset per run equals run length minus one: the run's first call
    /// starts the block and does not reduce the count itself.
    fn shape_block_offset(statements: &[Stmt], scope: &ScopeView) -> usize {
        let catalog = builtins();
        let is_shape_call = |stmt: &Stmt| match &stmt.kind {
            StmtKind::Call(call) => {
                matcher::match_first(call, catalog.drawing(&call.name), scope).is_some()
            }
            _ => false,
        };

        let mut offset = 0;
        let mut i = 0;
        while i < statements.len() {
            if !is_shape_call(&statements[i]) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < statements.len() && is_shape_call(&statements[j]) {
                offset += 1;
                j += 1;
            }
            // the statement at j ended the run and cannot start a new one
            i = j + 1;
        }
        offset
    }
}

impl Default for LongMethodDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for LongMethodDetector {
    fn detect(&self, unit: &SketchUnit) -> Vec<Smell> {
        let mut issues: Vec<Smell> = Vec::new();

        for top in &unit.classes {
            for class in classes_in(top) {
                for method in &class.methods {
                    if method.is_constructor {
                        continue;
                    }
                    // abstract stubs and bodies without expression statements
                    if method.statements.is_empty() {
                        continue;
                    }

                    let scope = ScopeView::new(top, class, method);
                    let offset = Self::shape_block_offset(&method.statements, &scope);

                    if method.ncss.saturating_sub(offset) > self.max_statements {
                        issues.push(Smell::new(
                            unit.location(method.result_span),
                            SmellIssue::LongMethod,
                            format!(
                                "Method '{}' counts {} statements (max recommended: {}). Consider breaking it into smaller methods.",
                                method.name, method.ncss, self.max_statements
                            ),
                        ));
                    }
                }
            }
        }

        sort_by_location(&mut issues);
        issues
    }
}
