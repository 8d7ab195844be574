// Analysis module - smell model shared by all detectors

pub mod detectors;
pub mod matcher;
pub mod reachability;
mod runner;

pub use runner::SmellAnalyzer;

use crate::model::Location;

/// Severity levels for reported smells
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// The design smells this tool can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmellIssue {
    /// Drawing operation issued outside the draw() call path
    DecentralizedDrawing,

    /// Top-level state mutated from a scope that does not own it
    OutOfScopeStateChange,

    /// Method exceeds the statement budget after shape-block merging
    LongMethod,

    /// Drawing call with hardcoded pixel coordinates, no transform active
    PixelHardcode,

    /// Nested class method shadows a sketch lifecycle name
    ReservedMethodName,

    /// Nested class without any state
    StatelessClass,
}

impl SmellIssue {
    pub fn code(&self) -> &'static str {
        match self {
            SmellIssue::DecentralizedDrawing => "PS001",
            SmellIssue::OutOfScopeStateChange => "PS002",
            SmellIssue::LongMethod => "PS003",
            SmellIssue::PixelHardcode => "PS004",
            SmellIssue::ReservedMethodName => "PS005",
            SmellIssue::StatelessClass => "PS006",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SmellIssue::DecentralizedDrawing => "decentralized-drawing",
            SmellIssue::OutOfScopeStateChange => "out-of-scope-state-change",
            SmellIssue::LongMethod => "long-method",
            SmellIssue::PixelHardcode => "pixel-hardcode",
            SmellIssue::ReservedMethodName => "reserved-method-name",
            SmellIssue::StatelessClass => "stateless-class",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            SmellIssue::DecentralizedDrawing => Severity::Warning,
            SmellIssue::OutOfScopeStateChange => Severity::Warning,
            SmellIssue::LongMethod => Severity::Warning,
            SmellIssue::PixelHardcode => Severity::Info,
            SmellIssue::ReservedMethodName => Severity::Warning,
            SmellIssue::StatelessClass => Severity::Info,
        }
    }
}

/// One reported design smell
///
/// Created by a detector and handed straight to the reporting layer; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Smell {
    /// Anchor position in the original source file
    pub location: Location,

    /// The kind of smell
    pub issue: SmellIssue,

    /// Severity level
    pub severity: Severity,

    /// Human-readable description with the offending names filled in
    pub message: String,
}

impl Smell {
    pub fn new(location: Location, issue: SmellIssue, message: String) -> Self {
        Self {
            location,
            issue,
            severity: issue.default_severity(),
            message,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Sort smells by file, then line, then column.
pub fn sort_by_location(smells: &mut [Smell]) {
    smells.sort_by(|a, b| {
        a.location
            .file
            .cmp(&b.location.file)
            .then(a.location.line.cmp(&b.location.line))
            .then(a.location.column.cmp(&b.location.column))
    });
}
