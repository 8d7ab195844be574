//! Stateless Class Detector
//!
//! Detects nested concrete classes that declare no fields. In a sketch, a
//! class without state is usually a bag of helper functions wearing a class
//! around itself; the methods could live on the sketch directly.
//! Interfaces and abstract classes are exempt, since they exist to be
//! filled in elsewhere.

use super::Detector;
use crate::analysis::{sort_by_location, Smell, SmellIssue};
use crate::model::{classes_in, SketchUnit};

/// Detector for nested classes without state
pub struct StatelessClassDetector;

impl StatelessClassDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatelessClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for StatelessClassDetector {
    fn detect(&self, unit: &SketchUnit) -> Vec<Smell> {
        let mut issues: Vec<Smell> = Vec::new();

        for top in &unit.classes {
            for class in classes_in(top).into_iter().skip(1) {
                if class.is_interface || class.is_abstract {
                    continue;
                }
                if class.fields.is_empty() {
                    issues.push(Smell::new(
                        unit.location(class.span),
                        SmellIssue::StatelessClass,
                        format!(
                            "Class '{}' declares no state. Consider moving its methods to where they are used.",
                            class.name
                        ),
                    ));
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
        StatelessClassDetector::new().detect(&unit)
    }

    #[test]
    fn test_stateless_nested_class_flagged() {
        let issues = detect(
            r#"
            class Sketch {
                class MathUtils {
                    float half(float v) { return v / 2; }
                }
            }
            "#,
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'MathUtils'"));
    }

    #[test]
    fn test_class_with_fields_is_fine() {
        let issues = detect(
            r#"
            class Sketch {
                class Ball {
                    float x;
                    void step() { x++; }
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_top_level_class_not_checked() {
        let issues = detect(
            r#"
            class Sketch {
                void draw() {}
            }
            "#,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_interfaces_and_abstract_classes_exempt() {
        let issues = detect(
            r#"
            class Sketch {
                interface Drawable {
                    void show();
                }
                abstract class Shape {
                    abstract void show();
                }
            }
            "#,
        );
        assert!(issues.is_empty());
    }
}
