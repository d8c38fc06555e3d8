//! Severity classification of fetched articles and list matches.

pub mod classifier;
pub mod types;

pub use classifier::ArticleClassifier;
pub use types::{ClassifiedResult, Origin, ResultSource, Severity};
