//! JSON reporter for machine consumption

use crate::analysis::Smell;
use miette::{IntoDiagnostic, Result};
use serde_json::json;
use std::path::PathBuf;

/// JSON reporter; writes to a file when an output path is set, stdout
/// otherwise.
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, smells: &[Smell]) -> Result<()> {
        let items: Vec<_> = smells
            .iter()
            .map(|smell| {
                json!({
                    "file": smell.location.file.display().to_string(),
                    "line": smell.location.line,
                    "column": smell.location.column,
                    "code": smell.issue.code(),
                    "rule": smell.issue.name(),
                    "severity": smell.severity.as_str(),
                    "message": smell.message,
                })
            })
            .collect();

        let document = json!({
            "version": env!("CARGO_PKG_VERSION"),
            "smells": items,
        });
        let rendered = serde_json::to_string_pretty(&document).into_diagnostic()?;

        match &self.output_path {
            Some(path) => std::fs::write(path, rendered).into_diagnostic()?,
            None => println!("{}", rendered),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SmellIssue;
    use crate::model::Location;

    #[test]
    fn test_json_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");

        let smells = vec![Smell::new(
            Location {
                file: PathBuf::from("pong/pong.pde"),
                line: 12,
                column: 3,
            },
            SmellIssue::DecentralizedDrawing,
            "Drawing operation 'rect' is called from 'splash'".to_string(),
        )];

        JsonReporter::new(Some(out.clone())).report(&smells).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["smells"][0]["code"], "PS001");
        assert_eq!(parsed["smells"][0]["line"], 12);
        assert_eq!(parsed["smells"][0]["rule"], "decentralized-drawing");
    }
}
