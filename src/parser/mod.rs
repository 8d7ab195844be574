mod java;
mod preprocess;

pub use java::JavaParser;
pub use preprocess::{PreparedSource, Preprocessor};
