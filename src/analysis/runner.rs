//! Analysis runner
//!
//! Turns discovered sources into parsed units and applies the configured
//! detector set to each. Every unit gets a fresh parser and fresh detector
//! state; nothing carries over between units, so units can be analyzed in
//! parallel without sharing.

use crate::analysis::detectors::{
    DecentralizedDrawingDetector, Detector, LongMethodDetector, OutOfScopeStateChangeDetector,
    PixelHardcodeDetector, ReservedMethodNamesDetector, StatelessClassDetector,
};
use crate::analysis::{sort_by_location, Smell, SmellIssue};
use crate::config::Config;
use crate::discovery::SketchSource;
use crate::error::SketchError;
use crate::model::SketchUnit;
use crate::parser::{JavaParser, Preprocessor};
use rayon::prelude::*;
use std::fs;
use tracing::debug;

/// Runs the detector catalog over compilation units.
pub struct SmellAnalyzer {
    config: Config,
}

impl SmellAnalyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The detector set enabled by the configuration.
    pub fn detectors(&self) -> Vec<Box<dyn Detector>> {
        let all: Vec<(SmellIssue, Box<dyn Detector>)> = vec![
            (
                SmellIssue::DecentralizedDrawing,
                Box::new(DecentralizedDrawingDetector::new()),
            ),
            (
                SmellIssue::OutOfScopeStateChange,
                Box::new(OutOfScopeStateChangeDetector::new()),
            ),
            (
                SmellIssue::LongMethod,
                Box::new(LongMethodDetector::new().with_max_statements(self.config.max_statements)),
            ),
            (
                SmellIssue::PixelHardcode,
                Box::new(PixelHardcodeDetector::new()),
            ),
            (
                SmellIssue::ReservedMethodName,
                Box::new(ReservedMethodNamesDetector::new()),
            ),
            (
                SmellIssue::StatelessClass,
                Box::new(StatelessClassDetector::new()),
            ),
        ];
        all.into_iter()
            .filter(|(issue, _)| self.config.rule_enabled(issue.code(), issue.name()))
            .map(|(_, detector)| detector)
            .collect()
    }

    /// Run every enabled detector over one parsed unit.
    pub fn analyze_unit(&self, unit: &SketchUnit) -> Vec<Smell> {
        let mut smells = Vec::new();
        for detector in self.detectors() {
            smells.extend(detector.detect(unit));
        }
        sort_by_location(&mut smells);
        smells
    }

    /// Read, preprocess and parse one source into a unit.
    pub fn parse_source(&self, source: &SketchSource) -> Result<SketchUnit, SketchError> {
        let preprocessor = Preprocessor::new();
        let prepared = if source.is_sketch() {
            let mut tabs = Vec::with_capacity(source.files.len());
            for file in &source.files {
                let content = fs::read_to_string(file).map_err(|e| SketchError::io(file, e))?;
                tabs.push((file.clone(), content));
            }
            preprocessor.wrap_sketch(&tabs)
        } else {
            let file = source
                .files
                .first()
                .ok_or_else(|| SketchError::parse(&source.name, "unit has no files"))?;
            let content = fs::read_to_string(file).map_err(|e| SketchError::io(file, e))?;
            preprocessor.prepare_java(file.clone(), content)
        };

        debug!("parsing unit '{}'", source.name);
        let mut parser = JavaParser::new()?;
        parser.parse_unit(&source.name, &prepared.source, prepared.line_map)
    }

    pub fn analyze_source(&self, source: &SketchSource) -> Result<Vec<Smell>, SketchError> {
        let unit = self.parse_source(source)?;
        Ok(self.analyze_unit(&unit))
    }

    /// Analyze every source, optionally across worker threads.
    pub fn analyze(
        &self,
        sources: &[SketchSource],
        parallel: bool,
    ) -> Result<Vec<Smell>, SketchError> {
        let results: Result<Vec<Vec<Smell>>, SketchError> = if parallel {
            sources.par_iter().map(|s| self.analyze_source(s)).collect()
        } else {
            sources.iter().map(|s| self.analyze_source(s)).collect()
        };
        let mut smells: Vec<Smell> = results?.into_iter().flatten().collect();
        sort_by_location(&mut smells);
        Ok(smells)
    }
}
