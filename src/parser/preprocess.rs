//! Processing-to-Java source preprocessing
//!
//! Processing sketches are not quite Java: the tabs of a sketch folder are
//! bare top-level code that the IDE concatenates and wraps in an applet
//! class before compiling, `int()`/`float()` act as casts, and `#FF0000`
//! is a color literal. This module performs the same rewrites so a plain
//! Java grammar can parse the result, and keeps a line map so diagnostics
//! point back at the original tab.
//!
//! All rewrites are line-preserving.

use crate::model::LineMap;
use regex::Regex;
use std::path::PathBuf;

const CLASS_HEADER: &str = "public class Sketch {\n";
const CLASS_FOOTER: &str = "}\n";
const HEADER_LINES: usize = 1;

/// A source string ready for the Java parser, with its tab line map.
pub struct PreparedSource {
    pub source: String,
    pub line_map: LineMap,
}

/// Rewrites Processing source into parseable Java.
pub struct Preprocessor {
    cast_int: Regex,
    cast_float: Regex,
    import_line: Regex,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            cast_int: Regex::new(r"\bint\s*\(").expect("static pattern"),
            cast_float: Regex::new(r"\bfloat\s*\(").expect("static pattern"),
            import_line: Regex::new(r"import[^\n;]*;").expect("static pattern"),
        }
    }

    /// Combine the tabs of one sketch folder into a single wrapped unit.
    pub fn wrap_sketch(&self, tabs: &[(PathBuf, String)]) -> PreparedSource {
        let mut combined = String::from(CLASS_HEADER);
        let mut segments = Vec::with_capacity(tabs.len());

        for (path, content) in tabs {
            let mut content = content.clone();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            segments.push((path.clone(), content.matches('\n').count()));
            combined.push_str(&content);
        }
        combined.push_str(CLASS_FOOTER);

        PreparedSource {
            source: self.to_java(&combined),
            line_map: LineMap::wrapped(segments, HEADER_LINES),
        }
    }

    /// A plain Java file parses as-is; only the identity line map is needed.
    pub fn prepare_java(&self, file: PathBuf, content: String) -> PreparedSource {
        PreparedSource {
            source: content,
            line_map: LineMap::single(file),
        }
    }

    fn to_java(&self, code: &str) -> String {
        let code = self.cast_int.replace_all(code, "toInt(");
        let code = self.cast_float.replace_all(&code, "toFloat(");
        let code = code.replace(" = #", " = 0x").replace("(#", "(0x");
        self.import_line.replace_all(&code, "").into_owned()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_in_class() {
        let pre = Preprocessor::new();
        let tabs = vec![(PathBuf::from("sketch.pde"), "void draw() {\n}\n".to_string())];
        let prepared = pre.wrap_sketch(&tabs);
        assert!(prepared.source.starts_with("public class Sketch {"));
        assert!(prepared.source.trim_end().ends_with('}'));
    }

    #[test]
    fn test_cast_rewrites() {
        let pre = Preprocessor::new();
        let tabs = vec![(
            PathBuf::from("sketch.pde"),
            "int x = int(4.2);\nfloat y = float(3);\nprintln(x);\n".to_string(),
        )];
        let prepared = pre.wrap_sketch(&tabs);
        assert!(prepared.source.contains("toInt(4.2)"));
        assert!(prepared.source.contains("toFloat(3)"));
        // the declared types are untouched
        assert!(prepared.source.contains("int x"));
        assert!(prepared.source.contains("float y"));
    }

    #[test]
    fn test_color_literal_rewrite() {
        let pre = Preprocessor::new();
        let tabs = vec![(
            PathBuf::from("sketch.pde"),
            "color c = #FF8800;\nfill(#00FF00);\n".to_string(),
        )];
        let prepared = pre.wrap_sketch(&tabs);
        assert!(prepared.source.contains("= 0xFF8800"));
        assert!(prepared.source.contains("fill(0x00FF00)"));
    }

    #[test]
    fn test_import_stripping_keeps_lines() {
        let pre = Preprocessor::new();
        let tabs = vec![(
            PathBuf::from("sketch.pde"),
            "import processing.sound.*;\nvoid draw() {\n}\n".to_string(),
        )];
        let prepared = pre.wrap_sketch(&tabs);
        assert!(!prepared.source.contains("import"));
        let before = tabs[0].1.matches('\n').count();
        // header + tab lines + footer
        assert_eq!(prepared.source.matches('\n').count(), before + 2);
    }

    #[test]
    fn test_tab_line_counts() {
        let pre = Preprocessor::new();
        let tabs = vec![
            (PathBuf::from("a.pde"), "int a;\nint b;\n".to_string()),
            (PathBuf::from("b.pde"), "int c;".to_string()),
        ];
        let prepared = pre.wrap_sketch(&tabs);
        // line 2 of the combined unit is line 1 of a.pde
        let loc = prepared.line_map.resolve(2, 1);
        assert_eq!(loc.file, PathBuf::from("a.pde"));
        assert_eq!(loc.line, 1);
        // line 4 is line 1 of b.pde
        let loc = prepared.line_map.resolve(4, 1);
        assert_eq!(loc.file, PathBuf::from("b.pde"));
        assert_eq!(loc.line, 1);
    }
}
