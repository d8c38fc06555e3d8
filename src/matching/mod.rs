//! Fuzzy name matching against sanctions lists.

pub mod matcher;
pub mod normalizer;
pub mod similarity;

pub use matcher::{SanctionsMatch, SanctionsMatcher};
pub use normalizer::normalize_name;
pub use similarity::sequence_ratio;

// Module-level constants
pub const TARGET_MATCHING: &str = "matching";
