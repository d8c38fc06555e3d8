//! Negative-news keyword sets and query construction.

/// Terms highlighted in result text when they appear alongside the
/// screened entity.
pub const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "fraud",
    "scam",
    "scandal",
    "ponzi",
    "laundering",
    "money laundering",
    "terrorist",
    "terrorism",
    "bribery",
    "corruption",
    "embezzlement",
    "sanction",
    "tax evasion",
    "tax fraud",
    "illegal",
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
    "black money",
    "suspicious",
    "investigation",
    "probe",
    "raid",
    "arrested",
    "charges",
    "indicted",
    "convicted",
    "lawsuit",
    "fine",
    "penalty",
    "regulatory action",
    "OFAC",
    "FATF",
    "FCPA",
    "terror financing",
    "shell company",
    "Iran",
    "Syria",
    "North Korea",
    "Cuba",
];

/// The subset of terms that go into provider queries. Querying with the
/// full highlight set produces queries too long for most news APIs.
pub const CORE_QUERY_KEYWORDS: &[&str] = &[
    "fraud",
    "laundering",
    "corruption",
    "sanction",
    "bribery",
    "investigation",
    "probe",
    "fine",
    "penalty",
];

/// Core query terms plus any caller-supplied extras, deduplicated.
pub fn query_keywords(extra: &[String]) -> Vec<String> {
    merge_keywords(CORE_QUERY_KEYWORDS, extra)
}

/// Default highlight terms plus any caller-supplied extras, deduplicated.
pub fn highlight_keywords(extra: &[String]) -> Vec<String> {
    merge_keywords(DEFAULT_NEGATIVE_KEYWORDS, extra)
}

fn merge_keywords(defaults: &[&str], extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = defaults.iter().map(|kw| kw.to_string()).collect();
    for keyword in extra {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !merged.iter().any(|existing| existing == trimmed) {
            merged.push(trimmed.to_string());
        }
    }
    merged
}

/// Builds the provider search query. A multi-word name is quoted so the
/// provider treats it as a phrase. With no name the query is just the
/// keyword disjunction.
pub fn build_query(name: &str, keywords: &[String]) -> String {
    let name = name.trim();
    let disjunction = keywords.join(" OR ");

    if name.is_empty() {
        return disjunction;
    }

    let quoted = if name.contains(' ') {
        format!("\"{}\"", name)
    } else {
        name.to_string()
    };

    if disjunction.is_empty() {
        quoted
    } else {
        format!("{} AND ({})", quoted, disjunction)
    }
}
