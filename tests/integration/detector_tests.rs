//! Integration tests for each detector type
//!
//! These tests drive the full pipeline (discovery, preprocessing, parsing,
//! detection) over fixture sketches and verify the reported smells.

use sketchsmell::{Config, FileFinder, Smell, SmellAnalyzer, SmellIssue};
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Analyze one fixture sketch folder with default configuration
fn analyze_sketch(name: &str) -> Vec<Smell> {
    let config = Config::default();
    let finder = FileFinder::new(&config);
    let path = fixtures_path().join("sketches").join(name);
    if !path.exists() {
        panic!("Fixture not found: {:?}", path);
    }
    let units = finder.find_units(&path).expect("discovery failed");
    assert_eq!(units.len(), 1, "expected one unit for sketch '{}'", name);

    let analyzer = SmellAnalyzer::new(config);
    analyzer.analyze(&units, false).expect("analysis failed")
}

fn count_of(smells: &[Smell], issue: SmellIssue) -> usize {
    smells.iter().filter(|s| s.issue == issue).count()
}

// ============================================================================
// Clean Sketch
// ============================================================================

mod clean_sketch_tests {
    use super::*;

    #[test]
    fn test_well_structured_sketch_is_clean() {
        let smells = analyze_sketch("bouncing");
        assert!(
            smells.is_empty(),
            "expected no smells, got: {:?}",
            smells.iter().map(|s| &s.message).collect::<Vec<_>>()
        );
    }
}

// ============================================================================
// Smelly Sketch (two tabs)
// ============================================================================

mod smelly_sketch_tests {
    use super::*;

    #[test]
    fn test_decentralized_drawing_found() {
        let smells = analyze_sketch("smelly");
        // ellipse() in mousePressed and rect() in the nested Hud.draw
        assert_eq!(count_of(&smells, SmellIssue::DecentralizedDrawing), 2);
    }

    #[test]
    fn test_drawing_from_draw_path_not_flagged() {
        let smells = analyze_sketch("smelly");
        assert!(!smells
            .iter()
            .any(|s| s.issue == SmellIssue::DecentralizedDrawing
                && s.message.contains("'drawPlayer'")));
    }

    #[test]
    fn test_out_of_scope_state_change_found() {
        let smells = analyze_sketch("smelly");
        assert_eq!(count_of(&smells, SmellIssue::OutOfScopeStateChange), 1);
        let smell = smells
            .iter()
            .find(|s| s.issue == SmellIssue::OutOfScopeStateChange)
            .unwrap();
        assert!(smell.message.contains("'score'"));
        assert!(smell.message.contains("'bump'"));
    }

    #[test]
    fn test_pixel_hardcode_found() {
        let smells = analyze_sketch("smelly");
        // ellipse(30, 30, ...), rect(4, 4, ...) and text(..., 12, 24)
        assert_eq!(count_of(&smells, SmellIssue::PixelHardcode), 3);
    }

    #[test]
    fn test_reserved_name_found() {
        let smells = analyze_sketch("smelly");
        assert_eq!(count_of(&smells, SmellIssue::ReservedMethodName), 1);
        let smell = smells
            .iter()
            .find(|s| s.issue == SmellIssue::ReservedMethodName)
            .unwrap();
        assert!(smell.message.contains("'Hud'"));
    }

    #[test]
    fn test_stateless_classes_found() {
        let smells = analyze_sketch("smelly");
        // both Hud and Palette declare no fields
        assert_eq!(count_of(&smells, SmellIssue::StatelessClass), 2);
    }

    #[test]
    fn test_locations_map_back_to_tabs() {
        let smells = analyze_sketch("smelly");

        // the event-handler drawing call lives in the main tab
        let in_main = smells
            .iter()
            .find(|s| s.issue == SmellIssue::DecentralizedDrawing
                && s.message.contains("'mousePressed'"))
            .unwrap();
        assert!(in_main.location.file.ends_with("smelly.pde"));

        // the nested Hud lives in the second tab
        let in_hud = smells
            .iter()
            .find(|s| s.issue == SmellIssue::ReservedMethodName)
            .unwrap();
        assert!(in_hud.location.file.ends_with("hud.pde"));
        // Hud.draw is declared on line 2 of hud.pde
        assert_eq!(in_hud.location.line, 2);
    }

    #[test]
    fn test_long_method_not_triggered_by_short_methods() {
        let smells = analyze_sketch("smelly");
        assert_eq!(count_of(&smells, SmellIssue::LongMethod), 0);
    }
}

// ============================================================================
// Long Methods
// ============================================================================

mod long_method_tests {
    use super::*;

    #[test]
    fn test_long_update_method_flagged() {
        let smells = analyze_sketch("mural");
        assert_eq!(count_of(&smells, SmellIssue::LongMethod), 1);
        let smell = smells
            .iter()
            .find(|s| s.issue == SmellIssue::LongMethod)
            .unwrap();
        assert!(smell.message.contains("'paintWall'"));
        assert!(smell.message.contains("56 statements"));
    }

    #[test]
    fn test_shape_block_method_not_flagged() {
        // paintMosaic has more raw statements than paintWall, but its
        // vertex block collapses to one counted line
        let smells = analyze_sketch("mural");
        assert!(!smells.iter().any(|s| s.message.contains("'paintMosaic'")));
    }
}

// ============================================================================
// Determinism
// ============================================================================

mod determinism_tests {
    use super::*;

    #[test]
    fn test_analysis_is_idempotent() {
        assert_eq!(analyze_sketch("smelly"), analyze_sketch("smelly"));
    }

    #[test]
    fn test_results_sorted_by_file_then_line() {
        let smells = analyze_sketch("smelly");
        let keys: Vec<_> = smells
            .iter()
            .map(|s| (s.location.file.clone(), s.location.line))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
