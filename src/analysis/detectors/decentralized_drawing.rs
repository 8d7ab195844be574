//! Decentralized Drawing Detector
//!
//! Detects drawing operations issued outside the draw() call path.
//!
//! ## Anti-Pattern
//!
//! ```java
//! void draw() {
//!     background(0);
//! }
//!
//! void mousePressed() {
//!     ellipse(mouseX, mouseY, 8, 8);  // drawn once, gone next frame
//! }
//! ```
//!
//! ## Why It's Bad
//!
//! - The frame is cleared every draw() pass; stray drawing flickers or
//!   silently disappears
//! - Rendering order becomes dependent on event timing
//! - The sketch's visual output can no longer be read from draw() alone
//!
//! ## Better Alternatives
//!
//! - Record state in event handlers, render it in draw()
//! - Route helper rendering through methods draw() actually calls
//!
//! The detector computes the set of methods transitively reachable from
//! draw() (through sibling calls, field-typed helpers and locals) and flags
//! any drawing-primitive call whose enclosing method is outside that set.
//! No drawing path at all (no draw() method) means nothing to compare
//! against, so the type is skipped.

use super::Detector;
use crate::analysis::reachability::CallGraph;
use crate::analysis::{matcher, sort_by_location, Smell, SmellIssue};
use crate::catalog::builtins;
use crate::model::{classes_in, ScopeView, SketchUnit};

/// Detector for drawing calls the render loop never reaches
pub struct DecentralizedDrawingDetector;

impl DecentralizedDrawingDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DecentralizedDrawingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DecentralizedDrawingDetector {
    fn detect(&self, unit: &SketchUnit) -> Vec<Smell> {
        let catalog = builtins();
        let mut issues: Vec<Smell> = Vec::new();

        for top in &unit.classes {
            if top.is_interface {
                continue;
            }
            let Some(draw) = top.draw_method() else {
                continue;
            };

            let graph = CallGraph::build(top);
            let reachable = graph.reachable_from(draw.id);

            for class in classes_in(top) {
                for method in &class.methods {
                    if reachable.contains(&method.id) {
                        continue;
                    }
                    let scope = ScopeView::new(top, class, method);
                    for call in &method.calls {
                        let Some(sig) =
                            matcher::match_first(call, catalog.drawing(&call.name), &scope)
                        else {
                            continue;
                        };
                        issues.push(Smell::new(
                            unit.location(call.span),
                            SmellIssue::DecentralizedDrawing,
                            format!(
                                "Drawing operation '{}' is called from '{}', which draw() never reaches. Route all drawing through the draw() loop.",
                                sig.name,
                                method.display_name()
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
        DecentralizedDrawingDetector::new().detect(&unit)
    }

    #[test]
    fn test_drawing_inside_draw_is_clean() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {
                    rect(10, 10, 50, 50);
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_drawing_in_called_helper_is_clean() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() { renderPlayer(); }
                void renderPlayer() { ellipse(1, 2, 3, 4); }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_drawing_in_uncalled_sibling_is_flagged_once() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() { background(0); }
                void splash() { ellipse(1, 2, 3, 4); }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'ellipse'"));
        assert!(issues[0].message.contains("'splash'"));
    }

    #[test]
    fn test_drawing_in_event_handler_is_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() { background(0); }
                void mousePressed() { rect(0, 0, 4, 4); }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'mousePressed'"));
    }

    #[test]
    fn test_helper_object_reached_from_draw_is_clean() {
        let issues = detect(
            r#"
            class Sketch {
                Ball ball;
                void draw() { ball.display(); }
                class Ball {
                    float x;
                    void display() { ellipse(x, x, 10, 10); }
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_unreached_nested_method_is_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                Ball ball;
                void draw() { ball.display(); }
                class Ball {
                    float x;
                    void display() {}
                    void flash() { rect(0, 0, 2, 2); }
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'flash'"));
    }

    #[test]
    fn test_drawing_in_constructor_is_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {}
                class Banner {
                    int w;
                    Banner() { rect(0, 0, 9, 9); }
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'Constructor'"));
    }

    #[test]
    fn test_type_without_draw_is_skipped() {
        let issues = detect(
            r#"
            class Util {
                void decorate() { rect(0, 0, 9, 9); }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_non_drawing_builtins_are_ignored() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {}
                void mousePressed() {
                    background(255);
                    pushMatrix();
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }
}
