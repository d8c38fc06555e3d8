//! Screening orchestration.
//!
//! One `Screener::screen` call runs both stages: fuzzy matching the
//! entity name against the combined sanctions lists, and fetching plus
//! classifying adverse news. Collaborator failures degrade the run
//! instead of aborting it; only invalid input is a hard error.

use futures::future::join_all;
use tracing::{info, warn};

use crate::classify::{ArticleClassifier, ClassifiedResult, Origin, ResultSource, Severity};
use crate::config::ScreeningConfig;
use crate::error::ScreeningError;
use crate::highlight::Highlighter;
use crate::keywords::{build_query, highlight_keywords, query_keywords};
use crate::matching::SanctionsMatcher;
use crate::sentiment::{NegativityClassifier, NegativitySignal};
use crate::sources::{Article, ArticleSource, ListCache, NameListSource, FALLBACK_SANCTIONS};
use crate::TARGET_PIPELINE;

/// Result ordering selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    NewestFirst,
    OldestFirst,
    SourceAZ,
    SanctionsFirst,
}

/// One screening request: who to screen and over what window.
#[derive(Debug, Clone)]
pub struct ScreeningRequest {
    pub name: String,
    pub extra_keywords: Vec<String>,
    /// Inclusive date bounds, `YYYY-MM-DD`.
    pub from_date: String,
    pub to_date: String,
    pub sort_key: SortKey,
    pub high_severity_only: bool,
}

/// Aggregated output of one screening run.
#[derive(Debug, Clone)]
pub struct ScreeningReport {
    pub results: Vec<ClassifiedResult>,
    pub articles_fetched: usize,
    pub sanction_names_screened: usize,
}

pub struct Screener {
    article_sources: Vec<Box<dyn ArticleSource>>,
    list_sources: Vec<Box<dyn NameListSource>>,
    classifier: Box<dyn NegativityClassifier>,
    matcher: SanctionsMatcher,
    highlighter: Highlighter,
    list_cache: ListCache,
    article_classifier: ArticleClassifier,
    max_classifier_input: usize,
}

impl Screener {
    pub fn new(config: &ScreeningConfig, classifier: Box<dyn NegativityClassifier>) -> Self {
        Self {
            article_sources: Vec::new(),
            list_sources: Vec::new(),
            classifier,
            matcher: SanctionsMatcher::new(config.similarity_threshold),
            highlighter: Highlighter::default(),
            list_cache: ListCache::new(config.list_cache_ttl),
            article_classifier: ArticleClassifier::new(config),
            max_classifier_input: config.max_classifier_input,
        }
    }

    pub fn with_article_source(mut self, source: Box<dyn ArticleSource>) -> Self {
        self.article_sources.push(source);
        self
    }

    pub fn with_list_source(mut self, source: Box<dyn NameListSource>) -> Self {
        self.list_sources.push(source);
        self
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Run one screening pass. Fails only on invalid input; source and
    /// classifier failures are logged and absorbed.
    pub async fn screen(&self, request: &ScreeningRequest) -> Result<ScreeningReport, ScreeningError> {
        let name = request.name.trim();
        if name.is_empty() && request.extra_keywords.iter().all(|kw| kw.trim().is_empty()) {
            return Err(ScreeningError::Input(
                "provide an entity name or at least one keyword".to_string(),
            ));
        }

        let (sanctions_results, names_screened) = if name.is_empty() {
            info!(
                target: TARGET_PIPELINE,
                "No entity name given; skipping sanctions screening"
            );
            (Vec::new(), 0)
        } else {
            let candidates = self.fetch_sanction_names().await;
            let screened = candidates.len();
            (self.match_sanctions(name, &candidates), screened)
        };

        let articles = self.fetch_articles(request).await;
        let articles_fetched = articles.len();
        info!(
            target: TARGET_PIPELINE,
            "Fetched {} articles across {} sources for '{}'",
            articles_fetched,
            self.article_sources.len(),
            name
        );

        let news_results = self.classify_articles(name, request, articles).await;

        let results = aggregate(sanctions_results, news_results, request.sort_key);
        Ok(ScreeningReport {
            results,
            articles_fetched,
            sanction_names_screened: names_screened,
        })
    }

    /// Combined candidate list: every configured list source via the
    /// cache, plus the built-in fallback entries, de-duplicated in
    /// arrival order.
    async fn fetch_sanction_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for source in &self.list_sources {
            names.extend(self.list_cache.get_or_fetch(source.as_ref()).await);
        }
        names.extend(FALLBACK_SANCTIONS.iter().map(|n| n.to_string()));

        let mut seen = std::collections::HashSet::new();
        names.retain(|n| seen.insert(n.clone()));
        names
    }

    fn match_sanctions(&self, name: &str, candidates: &[String]) -> Vec<ClassifiedResult> {
        self.matcher
            .match_name(name, candidates)
            .into_iter()
            .map(|hit| ClassifiedResult {
                headline: format!("Sanctions match: {}", hit.matched_name),
                source: ResultSource::SanctionsLists,
                date: String::new(),
                display_text: format!(
                    "Possible sanctions match: {} (similarity: {:.2})",
                    hit.matched_name, hit.similarity
                ),
                link: String::new(),
                confidence: hit.similarity,
                severity: Severity::High,
                origin: Origin::SanctionsList,
                model_label: "SANCTIONS_MATCH".to_string(),
            })
            .collect()
    }

    /// Query every article source concurrently. A failed source is
    /// logged and contributes nothing.
    async fn fetch_articles(&self, request: &ScreeningRequest) -> Vec<Article> {
        let query = build_query(&request.name, &query_keywords(&request.extra_keywords));

        let searches = self.article_sources.iter().map(|source| {
            let query = query.clone();
            async move {
                (
                    source.provider(),
                    source
                        .search(&query, &request.from_date, &request.to_date)
                        .await,
                )
            }
        });

        let mut articles = Vec::new();
        for (provider, outcome) in join_all(searches).await {
            match outcome {
                Ok(batch) => articles.extend(batch),
                Err(e) => {
                    warn!(
                        target: TARGET_PIPELINE,
                        "Article source {} failed: {}", provider, e
                    );
                }
            }
        }
        articles
    }

    async fn classify_articles(
        &self,
        name: &str,
        request: &ScreeningRequest,
        articles: Vec<Article>,
    ) -> Vec<ClassifiedResult> {
        let keywords = highlight_keywords(&request.extra_keywords);
        let mut results = Vec::new();

        for article in articles {
            let text = format!("{} {}", article.title, article.description)
                .trim()
                .to_string();
            if text.is_empty() {
                continue;
            }
            let input: String = text.chars().take(self.max_classifier_input).collect();

            let signal = match self.classifier.classify(&input).await {
                Ok(signal) => signal,
                Err(e) => {
                    warn!(
                        target: TARGET_PIPELINE,
                        "{} engine failed on \"{}\": {}",
                        self.classifier.engine(),
                        article.title,
                        e
                    );
                    NegativitySignal::neutral()
                }
            };

            let Some(mut result) = self.article_classifier.classify(&article, &signal) else {
                continue;
            };
            if request.high_severity_only && result.severity != Severity::High {
                continue;
            }
            result.display_text = self
                .highlighter
                .highlight(&result.display_text, name, &keywords);
            results.push(result);
        }
        results
    }
}

/// Merge both stages and apply the requested ordering.
pub fn aggregate(
    sanctions: Vec<ClassifiedResult>,
    news: Vec<ClassifiedResult>,
    sort_key: SortKey,
) -> Vec<ClassifiedResult> {
    let mut results = sanctions;
    results.extend(news);
    sort_results(&mut results, sort_key);
    results
}

/// Stable in every mode: equal keys keep arrival order, so repeated runs
/// over the same inputs render identically.
pub fn sort_results(results: &mut [ClassifiedResult], sort_key: SortKey) {
    match sort_key {
        SortKey::NewestFirst => results.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::OldestFirst => results.sort_by(|a, b| a.date.cmp(&b.date)),
        SortKey::SourceAZ => {
            results.sort_by(|a, b| {
                a.source
                    .to_string()
                    .to_lowercase()
                    .cmp(&b.source.to_string().to_lowercase())
            });
        }
        SortKey::SanctionsFirst => {
            results.sort_by_key(|r| match r.origin {
                Origin::SanctionsList => 0,
                Origin::NewsArticle => 1,
            });
        }
    }
}
