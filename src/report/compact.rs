//! Compact reporter - one line per issue, grep-friendly

use crate::analysis::Smell;
use crate::report::display_path;
use miette::Result;
use std::path::PathBuf;

/// Compact single-line-per-issue reporter
pub struct CompactReporter {
    base_path: Option<PathBuf>,
}

impl CompactReporter {
    pub fn new(base_path: Option<PathBuf>) -> Self {
        Self { base_path }
    }

    pub fn report(&self, smells: &[Smell]) -> Result<()> {
        for smell in smells {
            println!(
                "{}:{}:{}: {} [{}] {}",
                display_path(&smell.location.file, self.base_path.as_deref()),
                smell.location.line,
                smell.location.column,
                smell.severity,
                smell.issue.code(),
                smell.message
            );
        }
        Ok(())
    }
}
