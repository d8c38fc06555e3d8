//! Ratcliff/Obershelp sequence similarity.

/// Similarity ratio in [0, 1] between two strings: twice the total length
/// of the recursively matched common blocks divided by the combined input
/// length. Two empty strings score 1.0 by convention, so callers must not
/// compare names whose normalized form is empty.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let matched = match_count(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total length of the non-overlapping common blocks: take the longest
/// common block, then recurse on the pieces to its left and right.
fn match_count(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }

    len + match_count(&a[..a_start], &b[..b_start])
        + match_count(&a[a_start + len..], &b[b_start + len..])
}

/// Longest common contiguous block between `a` and `b`, as
/// `(start_in_a, start_in_b, length)`. Ties resolve to the earliest
/// position in `a`, then in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                current[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = current;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(sequence_ratio("acme", "acme"), 1.0);
        assert_eq!(sequence_ratio("a", "a"), 1.0);
        assert_eq!(sequence_ratio("lukoil oil company", "lukoil oil company"), 1.0);
    }

    #[test]
    fn test_empty_strings_match_by_convention() {
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("acme", ""), 0.0);
        assert_eq!(sequence_ratio("", "acme"), 0.0);
    }

    #[test]
    fn test_known_ratio() {
        // Longest block "bcd" (3 of 8 total chars): 2 * 3 / 8.
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_dissimilar_strings_score_low() {
        assert!(sequence_ratio("completely different text", "xyz") < 0.3);
    }

    #[test]
    fn test_symmetry_on_samples() {
        for (a, b) in [("abcd", "bcde"), ("lukoil", "lukoil plc"), ("x", "yx")] {
            assert!((sequence_ratio(a, b) - sequence_ratio(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_recursion_counts_all_blocks() {
        // "ab" and "cd" both match around the gap: 2 * 4 / 10.
        let ratio = sequence_ratio("abxcd", "abycd");
        assert!((ratio - 8.0 / 10.0).abs() < 1e-9);
    }
}
