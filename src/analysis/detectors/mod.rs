// Detectors for Processing design smells
//
// Each detector is a tree-walker over one parsed unit, stateful only within
// that unit. Detectors consume the catalog, matcher and reachability
// analyzer and emit smells; they never mutate the source model.

mod decentralized_drawing;
mod long_method;
mod out_of_scope_state;
mod pixel_hardcode;
mod reserved_names;
mod stateless_class;

pub use decentralized_drawing::DecentralizedDrawingDetector;
pub use long_method::LongMethodDetector;
pub use out_of_scope_state::OutOfScopeStateChangeDetector;
pub use pixel_hardcode::PixelHardcodeDetector;
pub use reserved_names::ReservedMethodNamesDetector;
pub use stateless_class::StatelessClassDetector;

use crate::analysis::Smell;
use crate::model::SketchUnit;

/// Trait for design smell detectors
pub trait Detector {
    /// Run the detector on one compilation unit and return found smells
    fn detect(&self, unit: &SketchUnit) -> Vec<Smell>;
}
