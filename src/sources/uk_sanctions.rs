//! UK consolidated sanctions list.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

use super::{names_from_csv, NameListSource, REQUEST_TIMEOUT};
use crate::TARGET_WEB_REQUEST;

const ENDPOINT: &str = "https://assets.publishing.service.gov.uk/government/uploads/system/uploads/attachment_data/file/1250823/UK_Sanctions_List.csv";

pub struct UkSanctionsSource {
    client: reqwest::Client,
    endpoint: String,
}

impl UkSanctionsSource {
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
impl NameListSource for UkSanctionsSource {
    fn name(&self) -> &str {
        "uk-sanctions"
    }

    async fn fetch(&self) -> Result<Vec<String>> {
        debug!(target: TARGET_WEB_REQUEST, "Downloading UK sanctions list");

        let request = self.client.get(&self.endpoint).send();
        let response = timeout(REQUEST_TIMEOUT, request)
            .await
            .map_err(|_| anyhow!("UK sanctions download timed out"))??
            .error_for_status()?;

        let body = response.text().await?;
        let names = names_from_csv(&body, &["name"]);
        debug!(
            target: TARGET_WEB_REQUEST,
            "UK sanctions list yielded {} names",
            names.len()
        );
        Ok(names)
    }
}
