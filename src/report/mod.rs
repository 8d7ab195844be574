mod colors;
mod compact;
mod json;
mod terminal;

pub use compact::CompactReporter;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::Smell;
use miette::Result;
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Default terminal output with colors
    #[default]
    Terminal,
    /// Compact one-line-per-issue format
    Compact,
    /// JSON machine-readable format
    Json,
}

/// Options for report generation
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Output file path (for JSON)
    pub output_path: Option<PathBuf>,
    /// Base path to strip from file paths for shorter display
    pub base_path: Option<PathBuf>,
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Shorten a path for display by stripping the analyzed root.
pub(crate) fn display_path(path: &Path, base: Option<&Path>) -> String {
    let shortened = base.and_then(|b| path.strip_prefix(b).ok()).unwrap_or(path);
    shortened.display().to_string()
}

/// Reporter for outputting smell analysis results
pub struct Reporter {
    format: ReportFormat,
    options: ReportOptions,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            options: ReportOptions {
                output_path,
                ..Default::default()
            },
        }
    }

    pub fn with_options(format: ReportFormat, options: ReportOptions) -> Self {
        Self { format, options }
    }

    /// Report the smell findings in the configured format.
    pub fn report(&self, smells: &[Smell]) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new(self.options.base_path.clone()).report(smells)
            }
            ReportFormat::Compact => {
                CompactReporter::new(self.options.base_path.clone()).report(smells)
            }
            ReportFormat::Json => {
                JsonReporter::new(self.options.output_path.clone()).report(smells)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path_strips_base() {
        let base = PathBuf::from("/work/sketches");
        let path = PathBuf::from("/work/sketches/pong/pong.pde");
        assert_eq!(display_path(&path, Some(&base)), "pong/pong.pde");
        assert_eq!(
            display_path(&path, None),
            "/work/sketches/pong/pong.pde"
        );
    }
}
