//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::prediction::{Predict, Prediction, PredictionError, PredictionInput};

/// Predictor that replays scripted outcomes and records every request.
/// Runs out into a parse error.
#[derive(Default)]
pub struct ScriptedPredictor {
    outcomes: Mutex<VecDeque<Result<Prediction, PredictionError>>>,
    pub requests: Mutex<Vec<PredictionInput>>,
}

impl ScriptedPredictor {
    pub fn new(outcomes: Vec<Result<Prediction, PredictionError>>) -> Arc<Self> {
        Arc::new(Self { outcomes: Mutex::new(outcomes.into()), requests: Mutex::new(Vec::new()) })
    }

    pub fn scores(scores: &[f64]) -> Arc<Self> {
        Self::new(scores.iter().map(|s| Ok(prediction(*s))).collect())
    }

    pub fn failing() -> Arc<Self> {
        Self::new(vec![Err(PredictionError::ApiRequest("connection refused".into()))])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Predict for ScriptedPredictor {
    async fn predict(&self, input: &PredictionInput) -> Result<Prediction, PredictionError> {
        self.requests.lock().unwrap().push(input.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PredictionError::ApiParse("no scripted outcome".into())))
    }
}

pub fn prediction(score: f64) -> Prediction {
    Prediction { predicted_anxiety_level: score, extra: serde_json::Map::new() }
}
