//! sketchsmell - Design smell detection for Processing sketches
//!
//! This library provides static analysis for interactive graphics programs
//! built on the Processing setup/draw execution model.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find sketch folders (.pde tabs) and .java files
//! 2. **Preprocessing** - Wrap sketch tabs into one parseable Java unit
//! 3. **Parsing** - Parse units with tree-sitter and lower them into the
//!    source model
//! 4. **Detection** - Run the smell detector catalog over each unit
//!    (signature matching, call reachability, statement metrics)
//! 5. **Reporting** - Output results in various formats

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;

pub use analysis::{Severity, Smell, SmellAnalyzer, SmellIssue};
pub use catalog::{builtins, ApiCatalog, ApiParameter, ApiSignature, Category};
pub use config::Config;
pub use discovery::{FileFinder, SketchSource};
pub use error::SketchError;
pub use model::{SketchUnit, Span};
pub use parser::{JavaParser, Preprocessor};
pub use report::{ReportFormat, Reporter};
