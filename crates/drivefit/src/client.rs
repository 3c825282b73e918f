//! HTTP client for the recommendation service
//!
//! The service itself is external; [`ScoringService`] is the seam the rest of
//! the crate talks to, and [`HttpScoringClient`] is its production implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::query::PreferenceQuery;
use crate::types::{HealthResponse, RecommendResponse};

const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Accepts a preference query and returns ranked, scored candidates
#[async_trait]
pub trait ScoringService: Send + Sync {
  async fn recommend(&self, query: &PreferenceQuery) -> Result<RecommendResponse, TransportError>;
}

pub struct HttpScoringClient {
  client: Client,
  config: ClientConfig,
}

impl HttpScoringClient {
  pub fn try_new(config: ClientConfig) -> Result<Self, TransportError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| TransportError::request(format!("failed to create HTTP client: {e}")))?;

    Ok(Self { client, config })
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  /// Check that the service is reachable
  pub async fn health_check(&self) -> Result<HealthResponse, TransportError> {
    let url = self.config.endpoint("/");
    let response = timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS), self.client.get(&url).send())
      .await
      .map_err(|_| TransportError::Timeout { secs: HEALTH_TIMEOUT_SECS })?
      .map_err(|e| self.send_error(e))?;

    Self::decode(response).await
  }

  fn send_error(&self, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
      TransportError::Timeout { secs: self.config.timeout_secs }
    } else {
      TransportError::request(error.to_string())
    }
  }

  async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      tracing::warn!(status = status.as_u16(), "service returned non-success status");
      return Err(TransportError::status(status.as_u16(), body));
    }

    let bytes = response.bytes().await.map_err(|e| TransportError::request(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| TransportError::decode(e.to_string()))
  }
}

#[async_trait]
impl ScoringService for HttpScoringClient {
  async fn recommend(&self, query: &PreferenceQuery) -> Result<RecommendResponse, TransportError> {
    let url = self.config.endpoint("/recommend");
    tracing::debug!(%url, location = %query.location, "sending recommendation request");

    let response = timeout(
      Duration::from_secs(self.config.timeout_secs),
      self.client.post(&url).json(query).send(),
    )
    .await
    .map_err(|_| TransportError::Timeout { secs: self.config.timeout_secs })?
    .map_err(|e| self.send_error(e))?;

    let result: RecommendResponse = Self::decode(response).await?;
    tracing::debug!(
      results = result.results.len(),
      using_mock_data = result.using_mock_data,
      "received recommendations"
    );
    Ok(result)
  }
}
