//! Negativity engines behind one injected interface.

pub mod lexicon;
pub mod remote;

pub use lexicon::LexiconClassifier;
pub use remote::RemoteClassifier;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output contract shared by every negativity engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NegativitySignal {
    /// Compound polarity score in [-1, 1] from a lexicon engine.
    Compound { score: f64 },
    /// (label, confidence) pair from a pretrained classifier.
    Labeled { label: String, confidence: f64 },
}

impl NegativitySignal {
    /// Neutral stand-in assigned when an engine fails on a single item,
    /// so one bad article never aborts the batch.
    pub fn neutral() -> Self {
        NegativitySignal::Compound { score: 0.0 }
    }
}

/// Label polarity for classifiers whose labels are opaque codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPolarity {
    Negative,
    NonNegative,
}

/// Per-classifier mapping from label codes to polarity. Supplied as
/// configuration; never inferred from the label text at call time.
#[derive(Debug, Clone, Default)]
pub struct LabelPolarityMap {
    entries: HashMap<String, LabelPolarity>,
}

impl LabelPolarityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `label` as negative. Lookup is case-insensitive.
    pub fn with_negative(mut self, label: &str) -> Self {
        self.entries
            .insert(label.to_lowercase(), LabelPolarity::Negative);
        self
    }

    pub fn is_negative(&self, label: &str) -> bool {
        matches!(
            self.entries.get(&label.to_lowercase()),
            Some(LabelPolarity::Negative)
        )
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// External sentiment engine. Implementations must not panic across the
/// batch boundary; failures surface as `Err` and the pipeline degrades
/// the single item to a neutral signal.
#[async_trait]
pub trait NegativityClassifier: Send + Sync {
    /// Short engine name used in logs.
    fn engine(&self) -> &str;

    async fn classify(&self, text: &str) -> anyhow::Result<NegativitySignal>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_polarity_lookup_is_case_insensitive() {
        let map = LabelPolarityMap::new().with_negative("LABEL_0");
        assert!(map.is_negative("label_0"));
        assert!(map.is_negative("LABEL_0"));
        assert!(!map.is_negative("LABEL_1"));
    }

    #[test]
    fn test_neutral_signal_is_not_negative() {
        assert_eq!(NegativitySignal::neutral(), NegativitySignal::Compound { score: 0.0 });
    }
}
