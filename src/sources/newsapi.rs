//! NewsAPI.org article source.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::debug;

use super::{Article, ArticleSource, NewsProvider, REQUEST_TIMEOUT};
use crate::TARGET_WEB_REQUEST;

const ENDPOINT: &str = "https://newsapi.org/v2/everything";
const PAGE_SIZE: &str = "100";

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

pub struct NewsApiSource {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl NewsApiSource {
    pub fn new(client: reqwest::Client, api_key: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn provider(&self) -> NewsProvider {
        NewsProvider::NewsApi
    }

    async fn search(&self, query: &str, from_date: &str, to_date: &str) -> Result<Vec<Article>> {
        debug!(target: TARGET_WEB_REQUEST, "Querying NewsAPI: {}", query);

        let request = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("q", query),
                ("from", from_date),
                ("to", to_date),
                ("language", "en"),
                ("pageSize", PAGE_SIZE),
            ])
            .send();

        let response = timeout(REQUEST_TIMEOUT, request)
            .await
            .map_err(|_| anyhow!("NewsAPI request timed out"))??
            .error_for_status()?;

        let body: NewsApiResponse = response.json().await?;
        Ok(body
            .articles
            .into_iter()
            .map(|raw| Article {
                title: raw.title.unwrap_or_default(),
                description: raw.description.unwrap_or_default(),
                date: raw.published_at.unwrap_or_default(),
                url: raw.url.unwrap_or_default(),
                source: NewsProvider::NewsApi,
            })
            .collect())
    }
}
