//! CSV export of screening results.

use std::io::Write;

use anyhow::Result;
use chrono::Local;

use crate::classify::ClassifiedResult;

pub const CSV_HEADER: &[&str] = &[
    "Title",
    "Source",
    "Date",
    "Severity",
    "Sentiment Score",
    "Model Label",
    "URL",
];

/// Writes results in presentation order. Column set and order are a
/// compatibility contract with downstream review tooling.
pub fn write_csv<W: Write>(results: &[ClassifiedResult], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for result in results {
        csv_writer.write_record(&[
            result.headline.as_str(),
            &result.source.to_string(),
            result.date.as_str(),
            &result.severity.to_string(),
            &format!("{:.4}", result.confidence),
            result.model_label.as_str(),
            result.link.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Default export file name: the screened name slugged plus today's date.
pub fn export_path(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let slug = if slug.is_empty() {
        "screening".to_string()
    } else {
        slug
    };
    format!("adverse_news_{}_{}.csv", slug, Local::now().format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Origin, ResultSource, Severity};
    use crate::sources::NewsProvider;

    #[test]
    fn test_csv_layout() {
        let results = vec![ClassifiedResult {
            headline: "Acme faces fraud probe".to_string(),
            source: ResultSource::News(NewsProvider::NewsApi),
            date: "2025-03-01".to_string(),
            display_text: String::new(),
            link: "https://example.com/a".to_string(),
            confidence: -0.55,
            severity: Severity::High,
            origin: Origin::NewsArticle,
            model_label: String::new(),
        }];

        let mut buffer = Vec::new();
        write_csv(&results, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Title,Source,Date,Severity,Sentiment Score,Model Label,URL"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Acme faces fraud probe,NewsAPI,2025-03-01,High,-0.5500,,https://example.com/a"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let results = vec![ClassifiedResult {
            headline: "Fines, penalties mount".to_string(),
            source: ResultSource::SanctionsLists,
            date: String::new(),
            display_text: String::new(),
            link: String::new(),
            confidence: 0.92,
            severity: Severity::High,
            origin: Origin::SanctionsList,
            model_label: "SANCTIONS_MATCH".to_string(),
        }];

        let mut buffer = Vec::new();
        write_csv(&results, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\"Fines, penalties mount\""));
    }

    #[test]
    fn test_export_path_slugs_the_name() {
        let path = export_path("Acme Holdings S.A.");
        assert!(path.starts_with("adverse_news_acme_holdings_s_a__"));
        assert!(path.ends_with(".csv"));
    }

    #[test]
    fn test_export_path_empty_name() {
        assert!(export_path("  ").starts_with("adverse_news_screening_"));
    }
}
