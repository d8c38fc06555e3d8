//! OFAC Specially Designated Nationals list.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use super::{names_from_csv, NameListSource, REQUEST_TIMEOUT};
use crate::TARGET_WEB_REQUEST;

const ENDPOINT: &str = "https://www.treasury.gov/ofac/downloads/sdn.csv";

pub struct OfacSdnSource {
    client: reqwest::Client,
    endpoint: String,
}

impl OfacSdnSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

#[async_trait]
impl NameListSource for OfacSdnSource {
    fn name(&self) -> &str {
        "ofac-sdn"
    }

    async fn fetch(&self) -> Result<Vec<String>> {
        debug!(target: TARGET_WEB_REQUEST, "Downloading OFAC SDN list");

        let request = self.client.get(&self.endpoint).send();
        let response = timeout(REQUEST_TIMEOUT, request)
            .await
            .map_err(|_| anyhow!("OFAC SDN download timed out"))??
            .error_for_status()?;

        let body = response.text().await?;
        let names = names_from_csv(&body, &["name", "sdn"]);
        debug!(
            target: TARGET_WEB_REQUEST,
            "OFAC SDN list yielded {} names",
            names.len()
        );
        Ok(names)
    }
}
