//! NewsData.io article source.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::debug;

use super::{Article, ArticleSource, NewsProvider, REQUEST_TIMEOUT};
use crate::TARGET_WEB_REQUEST;

const ENDPOINT: &str = "https://newsdata.io/api/1/news";

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    #[serde(default)]
    results: Vec<NewsDataArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsDataArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

pub struct NewsDataSource {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl NewsDataSource {
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
impl ArticleSource for NewsDataSource {
    fn provider(&self) -> NewsProvider {
        NewsProvider::NewsData
    }

    async fn search(&self, query: &str, from_date: &str, to_date: &str) -> Result<Vec<Article>> {
        debug!(target: TARGET_WEB_REQUEST, "Querying NewsData: {}", query);

        let request = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("q", query),
                ("from_date", from_date),
                ("to_date", to_date),
                ("language", "en"),
            ])
            .send();

        let response = timeout(REQUEST_TIMEOUT, request)
            .await
            .map_err(|_| anyhow!("NewsData request timed out"))??
            .error_for_status()?;

        let body: NewsDataResponse = response.json().await?;
        Ok(body
            .results
            .into_iter()
            .map(|raw| Article {
                title: raw.title.unwrap_or_default(),
                description: raw.description.unwrap_or_default(),
                date: raw.pub_date.unwrap_or_default(),
                url: raw.link.unwrap_or_default(),
                source: NewsProvider::NewsData,
            })
            .collect())
    }
}
