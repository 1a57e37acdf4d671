pub mod error;

pub use error::{NerError, Result};

use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

/// Person and organization names recognized in a piece of text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedEntities {
    #[serde(default)]
    pub persons: HashSet<String>,
    #[serde(default)]
    pub organizations: HashSet<String>,
}

/// Client for the NER sidecar's /extract endpoint. The sidecar runs the
/// actual NLP model; this client only moves text in and entity sets out.
pub struct NerClient {
    client: reqwest::Client,
    base_url: String,
}

impl NerClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Recognize person and organization names in the given text.
    pub async fn extract(&self, text: &str) -> Result<NamedEntities> {
        let endpoint = format!("{}/extract", self.base_url);
        let body = serde_json::json!({ "text": text });

        let resp = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(NerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }
}
