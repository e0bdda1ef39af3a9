//! HTTP client for the prediction endpoint.
//!
//! One JSON `POST` per assessment. No retries: a failure is reported once
//! and the user decides whether to submit again. Request and connect
//! timeouts bound how long a hung service can hold the form in `Loading`.

use std::time::Duration;

use tracing::debug;

use crate::config::HttpTimeouts;

use super::types::{Prediction, PredictionError, PredictionInput, parse_response};
use super::Predict;

pub struct HttpPredictionClient {
    http: reqwest::Client,
    url: String,
}

impl HttpPredictionClient {
    /// # Errors
    ///
    /// Returns [`PredictionError::HttpClientBuild`] if the TLS backend or
    /// client configuration cannot be initialised.
    pub fn new(url: impl Into<String>, timeouts: HttpTimeouts) -> Result<Self, PredictionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| PredictionError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.into() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl Predict for HttpPredictionClient {
    async fn predict(&self, input: &PredictionInput) -> Result<Prediction, PredictionError> {
        debug!(url = %self.url, "posting assessment");

        let response = self
            .http
            .post(&self.url)
            .json(input)
            .send()
            .await
            .map_err(|e| PredictionError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PredictionError::ApiRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(PredictionError::ApiResponse { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
