//! Out-of-Scope State Change Detector
//!
//! Detects mutations of top-level sketch state from scopes that do not own
//! it.
//!
//! ## Anti-Pattern
//!
//! ```java
//! int score = 0;
//!
//! class Enemy {
//!     void die() {
//!         score += 10;  // reaches out of its own class
//!     }
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - Any class can rewrite sketch globals, so no scope can reason about
//!   its own state
//! - Changes are invisible at the call site
//!
//! ## Better Alternatives
//!
//! - Return values and let the owner update its state
//! - Pass mutable collaborators explicitly
//!
//! A target name is a violation when it is a top-level field and neither
//! the mutating class nor the mutating method declares or shadows it. A
//! `this.` receiver does not exempt a mutation (`this.x` in a nested helper
//! still writes the enclosing field); a genuine local shadow or same-class
//! field does.

use super::Detector;
use crate::analysis::{sort_by_location, Smell, SmellIssue};
use crate::model::{classes_in, mutation_base_name, SketchUnit};

/// Detector for mutations of state owned by another scope
pub struct OutOfScopeStateChangeDetector;

impl OutOfScopeStateChangeDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OutOfScopeStateChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for OutOfScopeStateChangeDetector {
    fn detect(&self, unit: &SketchUnit) -> Vec<Smell> {
        let mut issues: Vec<Smell> = Vec::new();

        for top in &unit.classes {
            let globals = top.field_names();

            for class in classes_in(top) {
                let class_fields = class.field_names();

                for method in &class.methods {
                    let method_names = method.declared_names();

                    for stmt in &method.statements {
                        let Some(target) = stmt.mutation_target() else {
                            continue;
                        };
                        let base = mutation_base_name(target);
                        if base.is_empty() {
                            continue;
                        }
                        if globals.contains(base)
                            && !class_fields.contains(base)
                            && !method_names.contains(base)
                        {
                            issues.push(Smell::new(
                                unit.location(stmt.span),
                                SmellIssue::OutOfScopeStateChange,
                                format!(
                                    "Variable '{}' is changed from '{}' but is owned by the top-level sketch scope. Let the owning scope manage its own state.",
                                    base,
                                    method.display_name()
                                ),
                            ));
                        }
                    }
                }
            }
        }

        sort_by_location(&mut issues);
        issues
    }
}
