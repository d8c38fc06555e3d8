use tracing::debug;

use super::types::{ClassifiedResult, Origin, ResultSource, Severity};
use crate::config::ScreeningConfig;
use crate::sentiment::{LabelPolarityMap, NegativitySignal};
use crate::sources::Article;
use crate::TARGET_CLASSIFIER;

/// Maps a negativity signal onto a severity bucket and decides whether an
/// article is included at all. Non-negative articles are excluded from
/// results entirely; this is a filter, not a zero-severity tag.
pub struct ArticleClassifier {
    high_compound_cutoff: f64,
    medium_compound_cutoff: f64,
    high_confidence_cutoff: f64,
    medium_confidence_cutoff: f64,
    label_polarity: LabelPolarityMap,
}

impl ArticleClassifier {
    pub fn new(config: &ScreeningConfig) -> Self {
        Self {
            high_compound_cutoff: config.high_compound_cutoff,
            medium_compound_cutoff: config.medium_compound_cutoff,
            high_confidence_cutoff: config.high_confidence_cutoff,
            medium_confidence_cutoff: config.medium_confidence_cutoff,
            label_polarity: config.label_polarity.clone(),
        }
    }

    /// Severity bucket for a signal, or `None` when the signal is not
    /// negative. Pure function of the signal and the configured cutoffs.
    pub fn severity_for(&self, signal: &NegativitySignal) -> Option<Severity> {
        match signal {
            NegativitySignal::Compound { score } => {
                if *score >= 0.0 {
                    None
                } else if *score <= self.high_compound_cutoff {
                    Some(Severity::High)
                } else if *score <= self.medium_compound_cutoff {
                    Some(Severity::Medium)
                } else {
                    Some(Severity::Low)
                }
            }
            NegativitySignal::Labeled { label, confidence } => {
                if !self.is_negative_label(label) {
                    return None;
                }
                if *confidence >= self.high_confidence_cutoff {
                    Some(Severity::High)
                } else if *confidence >= self.medium_confidence_cutoff {
                    Some(Severity::Medium)
                } else {
                    Some(Severity::Low)
                }
            }
        }
    }

    /// A label is negative when it says so ("neg", any case) or when the
    /// configured per-classifier polarity map marks its opaque code
    /// negative. The mapping is supplied as configuration, never inferred.
    fn is_negative_label(&self, label: &str) -> bool {
        label.to_lowercase().contains("neg") || self.label_polarity.is_negative(label)
    }

    /// Classify one article. Returns `None` when the article is excluded
    /// (not negative).
    pub fn classify(&self, article: &Article, signal: &NegativitySignal) -> Option<ClassifiedResult> {
        let severity = self.severity_for(signal)?;

        debug!(
            target: TARGET_CLASSIFIER,
            "Classified \"{}\" as {} from {:?}", article.title, severity, signal
        );

        let headline = if article.title.trim().is_empty() {
            article.description.trim().to_string()
        } else {
            article.title.trim().to_string()
        };

        let (confidence, model_label) = match signal {
            NegativitySignal::Compound { score } => (*score, String::new()),
            NegativitySignal::Labeled { label, confidence } => (*confidence, label.clone()),
        };

        Some(ClassifiedResult {
            headline,
            source: ResultSource::News(article.source),
            date: article.date.clone(),
            display_text: format!("{} {}", article.title, article.description)
                .trim()
                .to_string(),
            link: article.url.clone(),
            confidence,
            severity,
            origin: Origin::NewsArticle,
            model_label,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::NewsProvider;

    fn classifier() -> ArticleClassifier {
        ArticleClassifier::new(&ScreeningConfig::default())
    }

    fn compound(score: f64) -> NegativitySignal {
        NegativitySignal::Compound { score }
    }

    fn labeled(label: &str, confidence: f64) -> NegativitySignal {
        NegativitySignal::Labeled {
            label: label.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_compound_buckets() {
        let c = classifier();
        assert_eq!(c.severity_for(&compound(-0.6)), Some(Severity::High));
        assert_eq!(c.severity_for(&compound(-0.5)), Some(Severity::High));
        assert_eq!(c.severity_for(&compound(-0.3)), Some(Severity::Medium));
        assert_eq!(c.severity_for(&compound(-0.2)), Some(Severity::Medium));
        assert_eq!(c.severity_for(&compound(-0.1)), Some(Severity::Low));
        assert_eq!(c.severity_for(&compound(0.0)), None);
        assert_eq!(c.severity_for(&compound(0.1)), None);
    }

    #[test]
    fn test_confidence_buckets() {
        let c = classifier();
        assert_eq!(c.severity_for(&labeled("negative", 0.9)), Some(Severity::High));
        assert_eq!(c.severity_for(&labeled("negative", 0.85)), Some(Severity::High));
        assert_eq!(c.severity_for(&labeled("negative", 0.7)), Some(Severity::Medium));
        assert_eq!(c.severity_for(&labeled("negative", 0.3)), Some(Severity::Low));
    }

    #[test]
    fn test_non_negative_labels_excluded() {
        let c = classifier();
        assert_eq!(c.severity_for(&labeled("positive", 0.99)), None);
        assert_eq!(c.severity_for(&labeled("neutral", 0.99)), None);
    }

    #[test]
    fn test_negative_label_matching_is_case_insensitive() {
        let c = classifier();
        assert_eq!(c.severity_for(&labeled("NEGATIVE", 0.9)), Some(Severity::High));
        assert_eq!(c.severity_for(&labeled("Neg", 0.9)), Some(Severity::High));
    }

    #[test]
    fn test_opaque_labels_need_explicit_mapping() {
        let unmapped = classifier();
        assert_eq!(unmapped.severity_for(&labeled("LABEL_0", 0.9)), None);

        let config = ScreeningConfig::default()
            .with_label_polarity(LabelPolarityMap::new().with_negative("LABEL_0"));
        let mapped = ArticleClassifier::new(&config);
        assert_eq!(
            mapped.severity_for(&labeled("LABEL_0", 0.9)),
            Some(Severity::High)
        );
        assert_eq!(mapped.severity_for(&labeled("LABEL_2", 0.9)), None);
    }

    #[test]
    fn test_bucketing_is_deterministic() {
        let c = classifier();
        for _ in 0..3 {
            assert_eq!(c.severity_for(&compound(-0.55)), Some(Severity::High));
        }
    }

    #[test]
    fn test_classify_builds_result_from_article() {
        let c = classifier();
        let article = Article {
            title: "Company X faces fraud probe".to_string(),
            description: "Regulators opened an investigation.".to_string(),
            date: "2026-02-11T08:00:00Z".to_string(),
            url: "https://example.com/article".to_string(),
            source: NewsProvider::NewsApi,
        };

        let result = c.classify(&article, &compound(-0.55)).unwrap();
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.origin, Origin::NewsArticle);
        assert_eq!(result.headline, "Company X faces fraud probe");
        assert_eq!(result.confidence, -0.55);
        assert_eq!(result.model_label, "");

        assert!(c.classify(&article, &compound(0.4)).is_none());
    }

    #[test]
    fn test_headline_falls_back_to_description() {
        let c = classifier();
        let article = Article {
            title: "  ".to_string(),
            description: "Bank fined over laundering controls".to_string(),
            date: String::new(),
            url: String::new(),
            source: NewsProvider::GNews,
        };

        let result = c.classify(&article, &labeled("negative", 0.7)).unwrap();
        assert_eq!(result.headline, "Bank fined over laundering controls");
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.model_label, "negative");
    }
}
