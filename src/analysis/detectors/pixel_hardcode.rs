//! Pixel Hardcode Detector
//!
//! Detects drawing calls that pass literal numbers in coordinate positions
//! while no matrix transform is in play.
//!
//! ## Anti-Pattern
//!
//! ```java
//! void draw() {
//!     rect(320, 240, 40, 40);  // breaks on any other canvas size
//! }
//! ```
//!
//! ## Better Alternatives
//!
//! - Derive positions from width/height
//! - Use translate()/scale() and draw in local coordinates
//!
//! Only pixel-tagged argument positions of the matched overload are
//! examined; a literal extent, count or color channel is fine. Once the
//! unit touches the matrix stack (pushMatrix/popMatrix) literal coordinates
//! are assumed to be deliberate local-space values and the check stays off
//! for the rest of the unit.

use super::Detector;
use crate::analysis::{matcher, sort_by_location, Smell, SmellIssue};
use crate::catalog::{builtins, MATRIX_METHODS};
use crate::model::{classes_in, ScopeView, SketchUnit};

/// Detector for hardcoded pixel coordinates
pub struct PixelHardcodeDetector;

impl PixelHardcodeDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PixelHardcodeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PixelHardcodeDetector {
    fn detect(&self, unit: &SketchUnit) -> Vec<Smell> {
        let catalog = builtins();
        let mut issues: Vec<Smell> = Vec::new();
        // latches for the rest of the unit once any matrix call is seen
        let mut touches_matrix = false;

        for top in &unit.classes {
            for class in classes_in(top) {
                for method in &class.methods {
                    let scope = ScopeView::new(top, class, method);
                    for call in &method.calls {
                        if matcher::match_any_variable(call, &MATRIX_METHODS, &scope).is_some() {
                            touches_matrix = true;
                        }
                        let Some(sig) =
                            matcher::match_first(call, catalog.applet(&call.name), &scope)
                        else {
                            continue;
                        };
                        if !touches_matrix && matcher::has_literal_pixel_args(call, sig) {
                            issues.push(Smell::new(
                                unit.location(call.span),
                                SmellIssue::PixelHardcode,
                                format!(
                                    "Call to {} hardcodes pixel coordinates in '{}'. Derive positions from width/height or draw under a transform.",
                                    sig,
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
        PixelHardcodeDetector::new().detect(&unit)
    }

    #[test]
    fn test_literal_coordinate_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {
                    ellipse(100, 100, 20, 20);
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("ellipse(float*, float*, float, float)"));
    }

    #[test]
    fn test_literal_extent_is_fine() {
        let issues = detect(
            r#"
            class Sketch {
                float x, y;
                void draw() {
                    ellipse(x, y, 20, 20);
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_derived_coordinates_are_fine() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {
                    rect(width / 2, height / 2, 40, 40);
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_matrix_call_disables_check_from_then_on() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {
                    pushMatrix();
                    rect(10, 10, 4, 4);
                    popMatrix();
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_calls_before_matrix_call_still_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {
                    rect(10, 10, 4, 4);
                    pushMatrix();
                    rect(10, 10, 4, 4);
                    popMatrix();
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_all_pixel_overloads_checked() {
        // every line() parameter is a coordinate
        let issues = detect(
            r#"
            class Sketch {
                float y;
                void draw() {
                    line(0, y, 640, y);
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("line"));
    }

    #[test]
    fn test_untagged_overload_not_flagged() {
        // translate() has no pixel-tagged positions in the table
        let issues = detect(
            r#"
            class Sketch {
                void draw() {
                    translate(120, 80);
                    rotate(1.57);
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }
}
