//! File discovery
//!
//! Finds the analyzable units under a project root. A directory containing
//! `.pde` tabs is one sketch: its tabs are concatenated into a single
//! compilation unit, main tab (named after the folder) first, the rest in
//! name order, the way the Processing IDE loads them. Standalone `.java`
//! files are units of their own.

use crate::config::Config;
use crate::error::SketchError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One compilation unit to analyze: a sketch folder's tabs or a Java file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchSource {
    pub name: String,
    pub files: Vec<PathBuf>,
}

impl SketchSource {
    /// Sketch units are wrapped before parsing; Java units are not.
    pub fn is_sketch(&self) -> bool {
        self.files
            .first()
            .and_then(|f| f.extension())
            .and_then(|e| e.to_str())
            == Some("pde")
    }
}

/// Walks a project tree and groups source files into units.
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn find_units(&self, root: &Path) -> Result<Vec<SketchSource>, SketchError> {
        let mut sketch_dirs: BTreeSet<PathBuf> = BTreeSet::new();
        let mut java_files: Vec<PathBuf> = Vec::new();

        for entry in ignore::WalkBuilder::new(root).build().flatten() {
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            if self.is_excluded(path) {
                continue;
            }
            match path.extension().and_then(|e| e.to_str()) {
                Some("pde") => {
                    if let Some(parent) = path.parent() {
                        sketch_dirs.insert(parent.to_path_buf());
                    }
                }
                Some("java") => java_files.push(path.to_path_buf()),
                _ => {}
            }
        }

        let mut units = Vec::new();
        for dir in sketch_dirs {
            units.push(self.collect_sketch(&dir));
        }
        java_files.sort();
        for file in java_files {
            let name = file
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            units.push(SketchSource {
                name,
                files: vec![file],
            });
        }
        Ok(units)
    }

    fn collect_sketch(&self, dir: &Path) -> SketchSource {
        // enumerate the folder directly: every tab must be present for the
        // line map to be correct, even tabs an ignore file would hide
        let mut tabs: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("pde"))
            .collect();
        tabs.sort();

        let name = dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let main_tab = format!("{}.pde", name);
        if let Some(pos) = tabs
            .iter()
            .position(|t| t.file_name().is_some_and(|f| f.to_string_lossy() == main_tab))
        {
            let main = tabs.remove(pos);
            tabs.insert(0, main);
        }

        SketchSource { name, files: tabs }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.config.exclude.iter().any(|pat| text.contains(pat.as_str()))
    }
}
