//! Prediction wire types and errors.

use serde::{Deserialize, Serialize, Serializer};

use crate::vitals::Vitals;

/// Scores strictly below this are low anxiety.
pub const LOW_ANXIETY_THRESHOLD: f64 = 5.0;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The HTTP request could not be completed (connect, timeout, transport).
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The response body was not a JSON object with a numeric score.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YesNo {
    Yes,
    No,
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

/// Request body in the service's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    #[serde(rename = "Sleep_Hours", serialize_with = "whole_as_integer")]
    pub sleep_hours: f64,
    #[serde(rename = "Physical_Activity_hrs_per_week", serialize_with = "whole_as_integer")]
    pub physical_activity: f64,
    #[serde(rename = "Caffeine_Intake_mg_per_day", serialize_with = "whole_as_integer")]
    pub caffeine: f64,
    #[serde(rename = "Alcohol_Consumption_drinks_per_week", serialize_with = "whole_as_integer")]
    pub alcohol: f64,
    #[serde(rename = "Smoking")]
    pub smoking: YesNo,
    #[serde(rename = "Family_History_of_Anxiety")]
    pub family_history_anxiety: YesNo,
    #[serde(rename = "Stress_Level_1_10", serialize_with = "whole_as_integer")]
    pub stress_level: f64,
    #[serde(rename = "Heart_Rate_bpm", serialize_with = "whole_as_integer")]
    pub heart_rate: f64,
    #[serde(rename = "Breathing_Rate_breaths_per_min", serialize_with = "whole_as_integer")]
    pub breathing_rate: f64,
    #[serde(rename = "Sweating_Level_1_5", serialize_with = "whole_as_integer")]
    pub sweating_level: f64,
    #[serde(rename = "Dizziness")]
    pub dizziness: YesNo,
    #[serde(rename = "Medication")]
    pub medication: YesNo,
    #[serde(rename = "Therapy_Sessions_per_month", serialize_with = "whole_as_integer")]
    pub therapy_sessions: f64,
    #[serde(rename = "Recent_Major_Life_Event")]
    pub recent_life_event: YesNo,
    #[serde(rename = "Diet_Quality_1_10", serialize_with = "whole_as_integer")]
    pub diet_quality: f64,
}

impl From<&Vitals> for PredictionInput {
    fn from(v: &Vitals) -> Self {
        Self {
            sleep_hours: v.sleep_hours,
            physical_activity: v.physical_activity,
            caffeine: v.caffeine,
            alcohol: v.alcohol,
            smoking: v.smoking.into(),
            family_history_anxiety: v.family_history_anxiety.into(),
            stress_level: v.stress_level,
            heart_rate: v.heart_rate,
            breathing_rate: v.breathing_rate,
            sweating_level: v.sweating_level,
            dizziness: v.dizziness.into(),
            medication: v.medication.into(),
            therapy_sessions: v.therapy_sessions,
            recent_life_event: v.recent_life_event.into(),
            diet_quality: v.diet_quality,
        }
    }
}

/// Whole numbers go out as JSON integers (`200`, not `200.0`).
#[allow(clippy::trivially_copy_pass_by_ref)]
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = *value as i64;
        serializer.serialize_i64(whole)
    } else {
        serializer.serialize_f64(*value)
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Service response. Only the score is relied on; every other field is
/// carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_anxiety_level: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Prediction {
    #[must_use]
    pub fn score(&self) -> f64 {
        self.predicted_anxiety_level
    }

    #[must_use]
    pub fn band(&self) -> AnxietyBand {
        AnxietyBand::from_score(self.predicted_anxiety_level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnxietyBand {
    Low,
    High,
}

impl AnxietyBand {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < LOW_ANXIETY_THRESHOLD { Self::Low } else { Self::High }
    }
}

/// Parse a response body. Anything other than a JSON object with a numeric
/// `predicted_anxiety_level` is an error.
///
/// # Errors
///
/// Returns [`PredictionError::ApiParse`] describing the mismatch.
pub fn parse_response(body: &str) -> Result<Prediction, PredictionError> {
    serde_json::from_str(body).map_err(|e| PredictionError::ApiParse(e.to_string()))
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
