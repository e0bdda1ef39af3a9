//! Remote anxiety prediction.
//!
//! DESIGN
//! ======
//! The model lives behind one HTTP endpoint and is treated as opaque. The
//! `Predict` trait is the seam: the controller only ever talks to the
//! trait, `HttpPredictionClient` is the production implementation, and tests
//! substitute scripted mocks.

pub mod client;
pub mod types;

pub use client::HttpPredictionClient;
pub use types::{AnxietyBand, Prediction, PredictionError, PredictionInput, YesNo, parse_response};

/// Provider-neutral async prediction call. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Predict: Send + Sync {
    /// Submit one assessment and return the parsed prediction.
    ///
    /// # Errors
    ///
    /// Returns a [`PredictionError`] if the request fails, the service
    /// answers with a non-success status, or the body has the wrong shape.
    async fn predict(&self, input: &PredictionInput) -> Result<Prediction, PredictionError>;
}
