//! Best-effort client for the external VIN resolution service.
//!
//! The service turns a vehicle identification number into a list of part
//! identifiers. It is network-bound and unreliable; a failed or slow call
//! degrades to "no VIN match" and index-backed resolution proceeds normally.
//! Every request is bounded by a timeout, failures are logged for operators
//! and never surfaced to the query path, and no retries are performed.

use crate::config::NetworkConfig;
use crate::error::{Result, XrefError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct VinResponse {
    #[serde(default)]
    articles: Vec<String>,
}

/// HTTP client for the VIN resolution endpoint.
#[derive(Debug, Clone)]
pub struct VinClient {
    client: Client,
    endpoint: String,
}

impl VinClient {
    /// Create a client for the given endpoint URL. The endpoint receives
    /// `GET ?vin=<vin>` requests and answers HTTP 200 with a JSON body
    /// exposing an `articles` list.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(NetworkConfig::RESOLVE_TIMEOUT)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| XrefError::Network {
                message: format!("Failed to create HTTP client: {e}"),
                cause: None,
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve a VIN to part identifiers, best-effort.
    ///
    /// Any non-200 status, transport error, or timeout is logged and
    /// reported as zero results.
    pub async fn resolve_vin(&self, vin: &str) -> Vec<String> {
        match self.try_resolve(vin).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("VIN resolution failed for {vin}: {e}");
                Vec::new()
            }
        }
    }

    async fn try_resolve(&self, vin: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("vin", vin)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(XrefError::Network {
                message: format!("VIN service returned {}", response.status()),
                cause: None,
            });
        }

        let body: VinResponse = response.json().await?;
        Ok(body.articles)
    }

    /// Quick liveness probe against the endpoint.
    pub async fn probe(&self) -> bool {
        let result = self
            .client
            .get(&self.endpoint)
            .timeout(NetworkConfig::PROBE_TIMEOUT)
            .send()
            .await;
        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("VIN probe failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let body: VinResponse =
            serde_json::from_str(r#"{"articles": ["17201-52010", "CT-VNT11B"]}"#).unwrap();
        assert_eq!(body.articles, vec!["17201-52010", "CT-VNT11B"]);
    }

    #[test]
    fn test_response_parsing_tolerates_missing_articles() {
        let body: VinResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(body.articles.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_service_degrades_to_empty() {
        // Nothing listens on this port; connection is refused immediately.
        let client = VinClient::new("http://127.0.0.1:9").unwrap();
        assert!(client.resolve_vin("JTDKN3DU0A0123456").await.is_empty());
        assert!(!client.probe().await);
    }
}
