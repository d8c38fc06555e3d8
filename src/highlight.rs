//! Marks up screened-entity names and negative keywords in result text.
//!
//! Name hits take precedence over keyword hits, and longer keywords are
//! tried before shorter ones so that a phrase like "money laundering"
//! is wrapped once instead of being split by its "laundering" substring.

use std::cmp::Reverse;

use regex::RegexBuilder;

#[derive(Debug, Clone)]
pub struct Marker {
    pub open: String,
    pub close: String,
}

impl Marker {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    name_marker: Marker,
    keyword_marker: Marker,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self {
            name_marker: Marker::new("<span class=\"hit-name\">", "</span>"),
            keyword_marker: Marker::new("<span class=\"hit-keyword\">", "</span>"),
        }
    }
}

impl Highlighter {
    pub fn new(name_marker: Marker, keyword_marker: Marker) -> Self {
        Self {
            name_marker,
            keyword_marker,
        }
    }

    /// Wraps whole-word occurrences of `name` and each keyword in their
    /// respective markers. Spans never overlap: once a region is
    /// claimed, later matches inside it are skipped.
    pub fn highlight(&self, text: &str, name: &str, keywords: &[String]) -> String {
        // (start, end, replacement) for each claimed span.
        let mut spans: Vec<(usize, usize, String)> = Vec::new();

        if !name.trim().is_empty() {
            self.collect_spans(text, name, &self.name_marker, &mut spans);
        }

        let mut ordered: Vec<&String> = keywords.iter().collect();
        ordered.sort_by_key(|kw| Reverse(kw.len()));
        for keyword in ordered {
            if keyword.trim().is_empty() {
                continue;
            }
            self.collect_spans(text, keyword, &self.keyword_marker, &mut spans);
        }

        if spans.is_empty() {
            return text.to_string();
        }

        spans.sort_by_key(|(start, _, _)| *start);
        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end, replacement) in spans {
            output.push_str(&text[cursor..start]);
            output.push_str(&replacement);
            cursor = end;
        }
        output.push_str(&text[cursor..]);
        output
    }

    fn collect_spans(
        &self,
        text: &str,
        term: &str,
        marker: &Marker,
        spans: &mut Vec<(usize, usize, String)>,
    ) {
        let pattern = format!(r"\b{}\b", regex::escape(term.trim()));
        let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => re,
            Err(_) => return,
        };

        for hit in re.find_iter(text) {
            let overlaps = spans
                .iter()
                .any(|(start, end, _)| hit.start() < *end && *start < hit.end());
            if overlaps {
                continue;
            }
            spans.push((
                hit.start(),
                hit.end(),
                format!("{}{}{}", marker.open, hit.as_str(), marker.close),
            ));
        }
    }
}
