//! Analysis engine tying tag selection, commits and release rules together

pub mod release_analyzer;

pub use release_analyzer::{ReleaseAnalyzer, ReleasePlan, ReleaseRequest};
