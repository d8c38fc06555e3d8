//! OpenSanctions dataset API.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::{sleep, timeout};
use tracing::debug;

use super::{NameListSource, REQUEST_TIMEOUT};
use crate::TARGET_WEB_REQUEST;

const ENDPOINT: &str = "https://api.opensanctions.org/datasets/default/entities/";
const PAGE_SIZE: usize = 1000;
const MAX_ITEMS: usize = 3000;
const PAGE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Deserialize)]
struct OsResponse {
    #[serde(default)]
    results: Vec<OsEntity>,
}

#[derive(Debug, Deserialize)]
struct OsEntity {
    #[serde(default)]
    properties: OsProperties,
}

#[derive(Debug, Default, Deserialize)]
struct OsProperties {
    #[serde(default)]
    name: Option<String>,
}

pub struct OpenSanctionsSource {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenSanctionsSource {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

#[async_trait]
impl NameListSource for OpenSanctionsSource {
    fn name(&self) -> &str {
        "opensanctions"
    }

    async fn fetch(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        let mut offset = 0;

        while names.len() < MAX_ITEMS {
            debug!(
                target: TARGET_WEB_REQUEST,
                "Fetching OpenSanctions page at offset {}",
                offset
            );

            let mut request = self.client.get(&self.endpoint).query(&[
                ("limit", PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
            ]);
            if let Some(key) = &self.api_key {
                request = request.header("Authorization", format!("ApiKey {}", key));
            }

            let response = timeout(REQUEST_TIMEOUT, request.send())
                .await
                .map_err(|_| anyhow!("OpenSanctions request timed out"))??;
            if !response.status().is_success() {
                break;
            }

            let body: OsResponse = response.json().await?;
            if body.results.is_empty() {
                break;
            }

            for entity in &body.results {
                if let Some(name) = &entity.properties.name {
                    let trimmed = name.trim();
                    if !trimmed.is_empty() && seen.insert(trimmed.to_string()) {
                        names.push(trimmed.to_string());
                    }
                }
            }

            offset += PAGE_SIZE;
            sleep(PAGE_DELAY).await;
        }

        names.truncate(MAX_ITEMS);
        debug!(
            target: TARGET_WEB_REQUEST,
            "OpenSanctions yielded {} names",
            names.len()
        );
        Ok(names)
    }
}
