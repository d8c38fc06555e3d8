//! HTTP adapter for a hosted transformer sentiment pipeline.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::cmp::Ordering;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use super::{NegativityClassifier, NegativitySignal};
use crate::TARGET_CLASSIFIER;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: usize = 3;

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Inference endpoints return either `[{label, score}, ...]` or the same
/// list nested one level per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Flat(Vec<LabelScore>),
    Nested(Vec<Vec<LabelScore>>),
}

/// Calls a sentiment-analysis inference endpoint and adapts its
/// label/score answer into a `NegativitySignal`.
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteClassifier {
    pub fn new(client: reqwest::Client, endpoint: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            api_key,
        }
    }

    async fn request(&self, text: &str) -> Result<NegativitySignal> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "classifier endpoint returned status {}",
                response.status()
            ));
        }

        let parsed: InferenceResponse = response.json().await?;
        let scores = match parsed {
            InferenceResponse::Flat(scores) => scores,
            InferenceResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        };

        let top = scores
            .into_iter()
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal))
            .ok_or_else(|| anyhow!("classifier returned no labels"))?;

        Ok(NegativitySignal::Labeled {
            label: top.label,
            confidence: top.score,
        })
    }
}

#[async_trait]
impl NegativityClassifier for RemoteClassifier {
    fn engine(&self) -> &str {
        "remote"
    }

    async fn classify(&self, text: &str) -> Result<NegativitySignal> {
        let mut backoff = 2;
        let mut last_error = None;

        for retry_count in 0..MAX_RETRIES {
            match timeout(REQUEST_TIMEOUT, self.request(text)).await {
                Ok(Ok(signal)) => {
                    debug!(target: TARGET_CLASSIFIER, "Classifier returned {:?}", signal);
                    return Ok(signal);
                }
                Ok(Err(err)) => {
                    warn!(target: TARGET_CLASSIFIER, "Classifier request failed: {}", err);
                    last_error = Some(err);
                }
                Err(_) => {
                    warn!(
                        target: TARGET_CLASSIFIER,
                        "Classifier request timed out after {}s", REQUEST_TIMEOUT.as_secs()
                    );
                    last_error = Some(anyhow!("classifier request timed out"));
                }
            }

            if retry_count < MAX_RETRIES - 1 {
                debug!(
                    target: TARGET_CLASSIFIER,
                    "Backing off for {} seconds before retry", backoff
                );
                sleep(Duration::from_secs(backoff)).await;
                backoff *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("classifier unavailable")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shapes_deserialize() {
        let flat: InferenceResponse =
            serde_json::from_str(r#"[{"label": "negative", "score": 0.97}]"#).unwrap();
        let scores = match flat {
            InferenceResponse::Flat(scores) => scores,
            InferenceResponse::Nested(_) => panic!("expected flat shape"),
        };
        assert_eq!(scores[0].label, "negative");

        let nested: InferenceResponse =
            serde_json::from_str(r#"[[{"label": "LABEL_0", "score": 0.88}]]"#).unwrap();
        let batches = match nested {
            InferenceResponse::Nested(batches) => batches,
            InferenceResponse::Flat(_) => panic!("expected nested shape"),
        };
        assert_eq!(batches[0][0].label, "LABEL_0");
    }
}
