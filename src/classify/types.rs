use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sources::NewsProvider;

/// Discretized risk level derived from a continuous negativity score.
/// Recomputing from the same score always yields the same bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "Low"),
            Severity::Medium => write!(f, "Medium"),
            Severity::High => write!(f, "High"),
        }
    }
}

/// Which family of results a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    SanctionsList,
    NewsArticle,
}

/// Source tag shown in the Source column of rendered and exported results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultSource {
    News(NewsProvider),
    SanctionsLists,
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultSource::News(provider) => write!(f, "{}", provider),
            ResultSource::SanctionsLists => write!(f, "SanctionsLists"),
        }
    }
}

/// A single adverse finding, from either the news stage or the sanctions
/// stage. Immutable once created; consumed by the sorter and the render
/// boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedResult {
    pub headline: String,
    pub source: ResultSource,
    /// Publication date as provided by the source; empty for list matches.
    pub date: String,
    /// Presentation copy of the text, with name/keyword spans marked.
    pub display_text: String,
    pub link: String,
    /// Model confidence or compound score for news; similarity for list
    /// matches.
    pub confidence: f64,
    pub severity: Severity,
    pub origin: Origin,
    pub model_label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(ResultSource::News(NewsProvider::NewsData).to_string(), "NewsData");
        assert_eq!(ResultSource::News(NewsProvider::NewsApi).to_string(), "NewsAPI");
        assert_eq!(ResultSource::News(NewsProvider::GNews).to_string(), "GNews");
        assert_eq!(ResultSource::SanctionsLists.to_string(), "SanctionsLists");
    }
}
