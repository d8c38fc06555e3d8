//! External article and name-list collaborators.
//!
//! Adapters in this module own provider-specific response shapes and map
//! them into the canonical records the pipeline consumes. Transport and
//! parse failures surface as `Err`; the pipeline makes the fail-open call.

pub mod cache;
pub mod gnews;
pub mod newsapi;
pub mod newsdata;
pub mod ofac;
pub mod opensanctions;
pub mod uk_sanctions;

pub use cache::ListCache;
pub use gnews::GNewsSource;
pub use newsapi::NewsApiSource;
pub use newsdata::NewsDataSource;
pub use ofac::OfacSdnSource;
pub use opensanctions::OpenSanctionsSource;
pub use uk_sanctions::UkSanctionsSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tokio::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// News providers wired into the screener. Display labels are part of the
/// export contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsProvider {
    NewsData,
    NewsApi,
    GNews,
}

impl fmt::Display for NewsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsProvider::NewsData => write!(f, "NewsData"),
            NewsProvider::NewsApi => write!(f, "NewsAPI"),
            NewsProvider::GNews => write!(f, "GNews"),
        }
    }
}

/// Canonical article record every provider adapter maps into. Immutable
/// once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    /// Publication date as provided by the source: heterogeneous ISO-ish
    /// strings, empty when the source omits it.
    pub date: String,
    pub url: String,
    pub source: NewsProvider,
}

/// A searchable news provider.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    fn provider(&self) -> NewsProvider;

    async fn search(
        &self,
        query: &str,
        from_date: &str,
        to_date: &str,
    ) -> anyhow::Result<Vec<Article>>;
}

/// A sanctions or watchlist publisher yielding raw candidate names.
#[async_trait]
pub trait NameListSource: Send + Sync {
    /// Stable identifier, also the cache key.
    fn name(&self) -> &str;

    async fn fetch(&self) -> anyhow::Result<Vec<String>>;
}

/// High-risk entities appended to whatever the remote lists return, so a
/// total list outage still screens against something.
pub const FALLBACK_SANCTIONS: &[&str] = &[
    "Lukoil",
    "Rosneft",
    "Gazprom",
    "Sberbank",
    "VTB",
    "Alrosa",
    "Gazprombank",
    "VTB Bank",
    "Rosneft Oil Company",
];

/// Extract candidate names from CSV list data. Columns are picked by
/// header substring (case-insensitive), falling back to the first column
/// when no header matches. Values are trimmed, de-duplicated, and the
/// SDN "-0-" null marker is dropped.
pub(crate) fn names_from_csv(data: &str, header_hints: &[&str]) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map(|headers| headers.clone())
        .unwrap_or_else(|_| csv::StringRecord::new());
    let mut columns: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| {
            let header = header.to_lowercase();
            header_hints.iter().any(|hint| header.contains(hint))
        })
        .map(|(index, _)| index)
        .collect();
    if columns.is_empty() {
        columns.push(0);
    }

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in reader.records().flatten() {
        for &column in &columns {
            if let Some(field) = record.get(column) {
                let field = field.trim();
                if !field.is_empty() && field != "-0-" && seen.insert(field.to_string()) {
                    names.push(field.to_string());
                }
            }
        }
    }
    names
}
