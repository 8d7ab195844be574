//! Terminal reporter with colored output

use crate::analysis::{Severity, Smell};
use crate::report::colors::{SeveritySymbol, StructureColors};
use crate::report::display_path;
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    base_path: Option<PathBuf>,
}

impl TerminalReporter {
    pub fn new(base_path: Option<PathBuf>) -> Self {
        Self { base_path }
    }

    pub fn report(&self, smells: &[Smell]) -> Result<()> {
        if smells.is_empty() {
            println!("{}", "No design smells found!".green().bold());
            return Ok(());
        }

        // Group by file, keeping files in path order
        let mut by_file: BTreeMap<PathBuf, Vec<&Smell>> = BTreeMap::new();
        for smell in smells {
            by_file
                .entry(smell.location.file.clone())
                .or_default()
                .push(smell);
        }

        println!();
        println!(
            "Found {} design smells:",
            StructureColors::count(&smells.len().to_string())
        );
        println!();

        for (file, mut items) in by_file {
            println!(
                "{}",
                StructureColors::file_path(&display_path(&file, self.base_path.as_deref()))
            );

            items.sort_by_key(|s| (s.location.line, s.location.column));
            for item in items {
                self.print_item(item);
            }
            println!();
        }

        self.print_summary(smells);
        Ok(())
    }

    fn print_item(&self, smell: &Smell) {
        let location = format!("{:>5}:{:<3}", smell.location.line, smell.location.column);
        println!(
            "  {} {} [{}] {}",
            StructureColors::location(&location),
            SeveritySymbol::colored(&smell.severity),
            StructureColors::rule_code(smell.issue.code()),
            smell.message
        );
    }

    fn print_summary(&self, smells: &[Smell]) {
        let errors = smells.iter().filter(|s| s.severity == Severity::Error).count();
        let warnings = smells
            .iter()
            .filter(|s| s.severity == Severity::Warning)
            .count();
        let infos = smells.iter().filter(|s| s.severity == Severity::Info).count();

        println!(
            "{} {} {}   {} {} {}   {} {} {}",
            SeveritySymbol::colored(&Severity::Error),
            StructureColors::count(&errors.to_string()),
            "errors".dimmed(),
            SeveritySymbol::colored(&Severity::Warning),
            StructureColors::count(&warnings.to_string()),
            "warnings".dimmed(),
            SeveritySymbol::colored(&Severity::Info),
            StructureColors::count(&infos.to_string()),
            "infos".dimmed(),
        );
    }
}
