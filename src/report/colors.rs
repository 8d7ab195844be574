//! Centralized color scheme for consistent output formatting

use colored::{ColoredString, Colorize};

/// Structural element colors
pub struct StructureColors;

impl StructureColors {
    /// File path header
    pub fn file_path(text: &str) -> ColoredString {
        text.cyan().bold()
    }

    /// Line/column numbers
    pub fn location(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Rule code (e.g., PS001)
    pub fn rule_code(text: &str) -> ColoredString {
        text.magenta()
    }

    /// Count/statistics numbers
    pub fn count(text: &str) -> ColoredString {
        text.white().bold()
    }
}

/// Severity symbols for compact display
pub struct SeveritySymbol;

impl SeveritySymbol {
    pub fn error() -> &'static str {
        "✖"
    }

    pub fn warning() -> &'static str {
        "⚠"
    }

    pub fn info() -> &'static str {
        "ℹ"
    }

    pub fn colored(severity: &crate::analysis::Severity) -> ColoredString {
        match severity {
            crate::analysis::Severity::Error => Self::error().red().bold(),
            crate::analysis::Severity::Warning => Self::warning().yellow(),
            crate::analysis::Severity::Info => Self::info().blue(),
        }
    }
}
