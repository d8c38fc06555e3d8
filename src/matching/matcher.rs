use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::normalizer::normalize_name;
use super::similarity::sequence_ratio;
use super::TARGET_MATCHING;

/// A sanctioned name whose similarity to the query met the threshold.
#[derive(Debug, Clone, Serialize)]
pub struct SanctionsMatch {
    /// The raw list entry, exactly as the source published it.
    pub matched_name: String,
    pub similarity: f64,
}

/// Fuzzy matcher over a combined list of sanctioned names. The threshold
/// is an operating-point decision, not an algorithmic one: 0.8 is the
/// strict preset, 0.6 the inclusive one.
pub struct SanctionsMatcher {
    threshold: f64,
}

impl SanctionsMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Match `query` against `candidates`, returning every candidate whose
    /// normalized similarity meets the threshold, ordered by descending
    /// similarity (ties keep list order). Candidates are de-duplicated by
    /// exact string before scoring; candidates and queries that normalize
    /// to empty are skipped to avoid spurious full-score matches.
    pub fn match_name(&self, query: &str, candidates: &[String]) -> Vec<SanctionsMatch> {
        let query_norm = normalize_name(query);
        if query_norm.is_empty() {
            warn!(
                target: TARGET_MATCHING,
                "Query '{}' normalizes to empty; skipping sanctions matching", query
            );
            return Vec::new();
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut matches = Vec::new();

        for candidate in candidates {
            if !seen.insert(candidate.as_str()) {
                continue;
            }

            let candidate_norm = normalize_name(candidate);
            if candidate_norm.is_empty() {
                debug!(
                    target: TARGET_MATCHING,
                    "Skipping candidate '{}' with empty normalized form", candidate
                );
                continue;
            }

            let similarity = sequence_ratio(&query_norm, &candidate_norm);
            if similarity >= self.threshold {
                debug!(
                    target: TARGET_MATCHING,
                    "Matched '{}' against '{}' with similarity {:.3}",
                    query, candidate, similarity
                );
                matches.push(SanctionsMatch {
                    matched_name: candidate.clone(),
                    similarity,
                });
            }
        }

        // Stable sort: equal scores preserve original list order.
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_after_normalization() {
        let matcher = SanctionsMatcher::new(0.6);
        let matches = matcher.match_name("Acme Ltd", &names(&["ACME LTD", "Beta Corp"]));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_name, "ACME LTD");
        assert_eq!(matches[0].similarity, 1.0);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let candidates = names(&["Lukoil", "Lukoil Oil", "Gazprom", "Lukas Oil Trading"]);

        let inclusive = SanctionsMatcher::new(0.6).match_name("Lukoil", &candidates);
        let strict = SanctionsMatcher::new(0.8).match_name("Lukoil", &candidates);

        assert!(strict.len() <= inclusive.len());
        for m in &strict {
            assert!(inclusive.iter().any(|i| i.matched_name == m.matched_name));
        }
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let matcher = SanctionsMatcher::new(0.0);
        let matches = matcher.match_name("abab", &names(&["xbab", "abab", "abxb"]));

        assert_eq!(matches[0].matched_name, "abab");
        // "xbab" and "abxb" score identically; list order is preserved.
        assert_eq!(matches[1].matched_name, "xbab");
        assert_eq!(matches[2].matched_name, "abxb");
    }

    #[test]
    fn test_duplicate_candidates_scored_once() {
        let matcher = SanctionsMatcher::new(0.6);
        let matches = matcher.match_name("Lukoil", &names(&["Lukoil", "Lukoil", "Lukoil"]));
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_empty_normalized_candidates_skipped() {
        let matcher = SanctionsMatcher::new(0.6);
        // "Ltd." normalizes to empty and must never produce a match.
        let matches = matcher.match_name("Acme", &names(&["Ltd.", "...", "ACME"]));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_name, "ACME");
    }

    #[test]
    fn test_empty_query_yields_no_matches() {
        let matcher = SanctionsMatcher::new(0.6);
        assert!(matcher.match_name("", &names(&["Acme"])).is_empty());
        assert!(matcher.match_name("Ltd.", &names(&["Acme"])).is_empty());
    }
}
