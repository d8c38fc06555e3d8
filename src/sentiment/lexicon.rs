//! Offline lexicon-based negativity engine.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::{NegativityClassifier, NegativitySignal};

static NEGATIVE_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "fraud",
        "fraudulent",
        "scam",
        "scandal",
        "ponzi",
        "laundering",
        "terrorist",
        "terrorism",
        "terror",
        "bribery",
        "bribe",
        "corruption",
        "corrupt",
        "embezzlement",
        "sanction",
        "sanctioned",
        "sanctions",
        "evasion",
        "illegal",
        "illicit",
        "crime",
        "criminal",
        "kickback",
        "smuggling",
        "forgery",
        "fake",
        "theft",
        "stolen",
        "misconduct",
        "collusion",
        "cartel",
        "suspicious",
        "investigation",
        "investigated",
        "probe",
        "raid",
        "arrested",
        "arrest",
        "charges",
        "charged",
        "indicted",
        "indictment",
        "convicted",
        "conviction",
        "guilty",
        "lawsuit",
        "sued",
        "fine",
        "fined",
        "penalty",
        "violation",
        "violations",
        "failure",
        "collapse",
        "crisis",
        "loss",
        "losses",
        "default",
        "bankruptcy",
        "insolvent",
    ]
    .into_iter()
    .collect()
});

static POSITIVE_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "growth",
        "profit",
        "profitable",
        "award",
        "awarded",
        "success",
        "successful",
        "cleared",
        "acquitted",
        "exonerated",
        "compliant",
        "partnership",
        "expansion",
        "record",
        "strong",
        "gain",
        "gains",
        "approved",
    ]
    .into_iter()
    .collect()
});

const NEGATORS: &[&str] = &["not", "no", "never", "without", "cannot", "neither", "nor"];

/// Tokens looked back at when deciding whether a hit is negated.
const NEGATION_WINDOW: usize = 3;

/// Dampens the raw hit sum into [-1, 1]: `x / sqrt(x^2 + ALPHA)`.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Word-lexicon scorer producing compound polarity signals. Fully offline;
/// the engine of choice when no inference endpoint is configured.
#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Compound polarity in [-1, 1]: +1/-1 per lexicon hit, sign flipped
    /// when a negator appears within the preceding window, normalized.
    pub fn compound_score(&self, text: &str) -> f64 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut raw: f64 = 0.0;

        for i in 0..tokens.len() {
            let token = tokens[i].as_str();
            let base = if NEGATIVE_TERMS.contains(token) {
                -1.0
            } else if POSITIVE_TERMS.contains(token) {
                1.0
            } else {
                continue;
            };

            let negated = (1..=NEGATION_WINDOW)
                .any(|back| i >= back && NEGATORS.contains(&tokens[i - back].as_str()));

            raw += if negated { -base } else { base };
        }

        raw / (raw * raw + NORMALIZATION_ALPHA).sqrt()
    }
}

#[async_trait]
impl NegativityClassifier for LexiconClassifier {
    fn engine(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> anyhow::Result<NegativitySignal> {
        Ok(NegativitySignal::Compound {
            score: self.compound_score(text),
        })
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adverse_text_scores_negative() {
        let engine = LexiconClassifier::new();
        let score = engine.compound_score("Company X faces fraud probe after laundering charges");
        assert!(score < -0.2, "expected a clearly negative score, got {score}");
    }

    #[test]
    fn test_neutral_text_scores_zero() {
        let engine = LexiconClassifier::new();
        assert_eq!(engine.compound_score("The weather was mild on Tuesday"), 0.0);
        assert_eq!(engine.compound_score(""), 0.0);
    }

    #[test]
    fn test_positive_text_scores_positive() {
        let engine = LexiconClassifier::new();
        assert!(engine.compound_score("Record growth and strong profit this quarter") > 0.0);
    }

    #[test]
    fn test_negation_flips_sign() {
        let engine = LexiconClassifier::new();
        let plain = engine.compound_score("guilty");
        let negated = engine.compound_score("not guilty");
        assert!(plain < 0.0);
        assert!(negated > 0.0);
    }

    #[test]
    fn test_score_is_bounded() {
        let engine = LexiconClassifier::new();
        let many_hits = "fraud scam scandal bribery corruption theft smuggling ".repeat(20);
        let score = engine.compound_score(&many_hits);
        assert!((-1.0..=1.0).contains(&score));
        assert!(score < -0.9);
    }
}
