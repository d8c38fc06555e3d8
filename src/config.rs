//! Screening configuration.
//!
//! Thresholds default to the values below and may be overridden through
//! `VIGIL_*` environment variables or builder methods.

use chrono::Duration;

use crate::environment::{get_env_var_as_vec, get_env_var_or};
use crate::error::ScreeningError;
use crate::sentiment::LabelPolarityMap;

/// Similarity at or above which a name is treated as a near-certain hit.
pub const STRICT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Looser cutoff for reviews where recall matters more than precision.
pub const INCLUSIVE_SIMILARITY_THRESHOLD: f64 = 0.6;

pub const HIGH_CONFIDENCE_CUTOFF: f64 = 0.85;
pub const MEDIUM_CONFIDENCE_CUTOFF: f64 = 0.6;

pub const HIGH_COMPOUND_CUTOFF: f64 = -0.5;
pub const MEDIUM_COMPOUND_CUTOFF: f64 = -0.2;

/// Classifier input is truncated to this many characters.
pub const MAX_CLASSIFIER_INPUT: usize = 1024;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 365 * 7;

const DEFAULT_LIST_CACHE_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    pub similarity_threshold: f64,
    pub high_confidence_cutoff: f64,
    pub medium_confidence_cutoff: f64,
    pub high_compound_cutoff: f64,
    pub medium_compound_cutoff: f64,
    pub label_polarity: LabelPolarityMap,
    pub list_cache_ttl: Duration,
    pub max_classifier_input: usize,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: STRICT_SIMILARITY_THRESHOLD,
            high_confidence_cutoff: HIGH_CONFIDENCE_CUTOFF,
            medium_confidence_cutoff: MEDIUM_CONFIDENCE_CUTOFF,
            high_compound_cutoff: HIGH_COMPOUND_CUTOFF,
            medium_compound_cutoff: MEDIUM_COMPOUND_CUTOFF,
            label_polarity: LabelPolarityMap::new(),
            list_cache_ttl: Duration::hours(DEFAULT_LIST_CACHE_HOURS),
            max_classifier_input: MAX_CLASSIFIER_INPUT,
        }
    }
}

impl ScreeningConfig {
    /// Builds a config from `VIGIL_*` environment variables, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.similarity_threshold =
            get_env_var_or("VIGIL_SIMILARITY_THRESHOLD", config.similarity_threshold);
        config.list_cache_ttl = Duration::hours(get_env_var_or(
            "VIGIL_LIST_CACHE_HOURS",
            DEFAULT_LIST_CACHE_HOURS,
        ));

        let mut polarity = LabelPolarityMap::new();
        for label in get_env_var_as_vec("VIGIL_NEGATIVE_LABELS", ',') {
            polarity = polarity.with_negative(&label);
        }
        config.label_polarity = polarity;
        config
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_label_polarity(mut self, map: LabelPolarityMap) -> Self {
        self.label_polarity = map;
        self
    }

    pub fn with_list_cache_ttl(mut self, ttl: Duration) -> Self {
        self.list_cache_ttl = ttl;
        self
    }

    pub fn validate(&self) -> Result<(), ScreeningError> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ScreeningError::Configuration(format!(
                "similarity threshold {} must be between 0 and 1",
                self.similarity_threshold
            )));
        }
        if self.medium_confidence_cutoff > self.high_confidence_cutoff {
            return Err(ScreeningError::Configuration(
                "medium confidence cutoff exceeds high confidence cutoff".to_string(),
            ));
        }
        if self.high_compound_cutoff > self.medium_compound_cutoff {
            return Err(ScreeningError::Configuration(
                "high compound cutoff must be at or below the medium cutoff".to_string(),
            ));
        }
        if self.max_classifier_input == 0 {
            return Err(ScreeningError::Configuration(
                "classifier input limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(ScreeningConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let config = ScreeningConfig::default().with_similarity_threshold(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_confidence_cutoffs_are_rejected() {
        let mut config = ScreeningConfig::default();
        config.medium_confidence_cutoff = 0.9;
        config.high_confidence_cutoff = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_compound_cutoffs_are_rejected() {
        let mut config = ScreeningConfig::default();
        config.high_compound_cutoff = -0.1;
        config.medium_compound_cutoff = -0.4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_overrides_apply() {
        let config = ScreeningConfig::default()
            .with_similarity_threshold(INCLUSIVE_SIMILARITY_THRESHOLD)
            .with_list_cache_ttl(Duration::hours(1));
        assert_eq!(config.similarity_threshold, INCLUSIVE_SIMILARITY_THRESHOLD);
        assert_eq!(config.list_cache_ttl, Duration::hours(1));
    }
}
