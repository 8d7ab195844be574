//! Reserved Method Names Detector
//!
//! Detects nested classes declaring methods whose names collide with the
//! sketch lifecycle: setup(), draw(), and the mouse/key event handlers. The
//! framework only dispatches those names on the top-level applet, so a
//! nested `draw()` looks like a render callback but is never called as one.

use super::Detector;
use crate::analysis::{sort_by_location, Smell, SmellIssue};
use crate::catalog::is_reserved_lifecycle_name;
use crate::model::{classes_in, SketchUnit};

/// Detector for lifecycle-name collisions in nested types
pub struct ReservedMethodNamesDetector;

impl ReservedMethodNamesDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReservedMethodNamesDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ReservedMethodNamesDetector {
    fn detect(&self, unit: &SketchUnit) -> Vec<Smell> {
        let mut issues: Vec<Smell> = Vec::new();

        for top in &unit.classes {
            // only nested types; the top-level applet owns these names
            for class in classes_in(top).into_iter().skip(1) {
                for method in &class.methods {
                    if method.is_constructor {
                        continue;
                    }
                    if is_reserved_lifecycle_name(&method.name) {
                        issues.push(Smell::new(
                            unit.location(method.result_span),
                            SmellIssue::ReservedMethodName,
                            format!(
                                "Method '{}' in nested class '{}' shadows a sketch lifecycle method; the framework will never call it. Pick a different name.",
                                method.name, class.name
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineMap;
    use crate::parser::JavaParser;
    use std::path::PathBuf;

    fn detect(source: &str) -> Vec<Smell> {
        let mut parser = JavaParser::new().unwrap();
        let unit = parser
            .parse_unit("test", source, LineMap::single(PathBuf::from("Test.java")))
            .unwrap();
        ReservedMethodNamesDetector::new().detect(&unit)
    }

    #[test]
    fn test_nested_draw_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {}
                class Hud {
                    int rows;
                    void draw() {}
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'draw'"));
        assert!(issues[0].message.contains("'Hud'"));
    }

    #[test]
    fn test_nested_event_handler_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                class Button {
                    int w;
                    void mousePressed() {}
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'mousePressed'"));
    }

    #[test]
    fn test_top_level_lifecycle_methods_are_fine() {
        let issues = detect(
            r#"
            class Sketch {
                void setup() {}
                void draw() {}
                void keyPressed() {}
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_similar_names_are_fine() {
        let issues = detect(
            r#"
            class Sketch {
                class Hud {
                    int rows;
                    void drawFrame() {}
                    void d() {}
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }
}
