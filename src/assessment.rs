//! Assessment controller: the form → loading → result state machine.
//!
//! DESIGN
//! ======
//! ```text
//!            begin_submit              complete_submit(Ok, score < 5)
//!   Idle ─────────────────▶ Submitting ─────────────────────────────▶ ResultLowAnxiety
//!    ▲                          │      complete_submit(Ok, score ≥ 5)
//!    │                          ├─────────────────────────────────────▶ ResultHighAnxiety
//!    │   complete_submit(Err)   │
//!    ├──────────────────────────┘
//!    │                 reset (from any state)
//!    └──────────────────────────────────────────────────────────────────
//! ```
//! The submit is split in two so a front end can render the loading view
//! while the request is in flight; [`AssessmentController::submit`] runs
//! both halves for callers that just want to await the outcome.
//!
//! ERROR HANDLING
//! ==============
//! A failed prediction returns to `Idle` with the vitals untouched and no
//! prediction stored. There is no retry; the user resubmits.

use tracing::{info, warn};

use crate::prediction::{AnxietyBand, Predict, Prediction, PredictionError, PredictionInput};
use crate::vitals::{FieldValue, VitalField, Vitals, VitalsError};

/// Blocking notice shown when the prediction call fails.
pub const PREDICTION_FAILED_NOTICE: &str = "Failed to get prediction from the API. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssessmentState {
    #[default]
    Idle,
    Submitting,
    ResultLowAnxiety,
    ResultHighAnxiety,
}

impl AssessmentState {
    #[must_use]
    pub fn band(self) -> Option<AnxietyBand> {
        match self {
            Self::ResultLowAnxiety => Some(AnxietyBand::Low),
            Self::ResultHighAnxiety => Some(AnxietyBand::High),
            Self::Idle | Self::Submitting => None,
        }
    }

    fn for_band(band: AnxietyBand) -> Self {
        match band {
            AnxietyBand::Low => Self::ResultLowAnxiety,
            AnxietyBand::High => Self::ResultHighAnxiety,
        }
    }
}

/// The user's answer on the result view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decision {
    #[default]
    Unset,
    Yes,
    No,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("an assessment is already being submitted")]
    AlreadySubmitting,
    #[error("start a new assessment before submitting again")]
    ResultShowing,
    #[error("no assessment is being submitted")]
    NotSubmitting,
    #[error("no result is being shown")]
    NoResult,
    #[error("a decision has already been made")]
    DecisionAlreadyMade,
    #[error("a decision must be yes or no")]
    EmptyDecision,
    #[error("Failed to get prediction from the API. Please try again.")]
    Prediction(#[source] PredictionError),
}

// =============================================================================
// CONTROLLER
// =============================================================================

#[derive(Debug, Default)]
pub struct AssessmentController {
    vitals: Vitals,
    state: AssessmentState,
    prediction: Option<Prediction>,
    decision: Decision,
}

impl AssessmentController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> AssessmentState {
        self.state
    }

    #[must_use]
    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    #[must_use]
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    #[must_use]
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Replace one vitals field. Not guarded while a request is in flight;
    /// the request already carries its own copy of the record.
    ///
    /// # Errors
    ///
    /// See [`Vitals::update_field`].
    pub fn update_field(&mut self, field: VitalField, value: FieldValue) -> Result<(), VitalsError> {
        self.vitals.update_field(field, value)
    }

    /// `Idle → Submitting`. Clears any previous prediction and decision and
    /// returns the request body for the current record.
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::AlreadySubmitting`] while a request is in
    /// flight, or [`AssessmentError::ResultShowing`] until the result is
    /// reset.
    pub fn begin_submit(&mut self) -> Result<PredictionInput, AssessmentError> {
        match self.state {
            AssessmentState::Idle => {}
            AssessmentState::Submitting => return Err(AssessmentError::AlreadySubmitting),
            AssessmentState::ResultLowAnxiety | AssessmentState::ResultHighAnxiety => {
                return Err(AssessmentError::ResultShowing);
            }
        }
        self.prediction = None;
        self.decision = Decision::Unset;
        self.state = AssessmentState::Submitting;
        info!("assessment submitted");
        Ok(PredictionInput::from(&self.vitals))
    }

    /// Apply the outcome of the request started by [`Self::begin_submit`].
    ///
    /// # Errors
    ///
    /// Returns [`AssessmentError::NotSubmitting`] if no request is pending
    /// (the outcome is dropped), or [`AssessmentError::Prediction`] after
    /// returning to `Idle` on a failed request.
    pub fn complete_submit(
        &mut self,
        outcome: Result<Prediction, PredictionError>,
    ) -> Result<AnxietyBand, AssessmentError> {
        if self.state != AssessmentState::Submitting {
            return Err(AssessmentError::NotSubmitting);
        }

        match outcome {
            Ok(prediction) => {
                let band = prediction.band();
                info!(score = prediction.score(), ?band, "prediction received");
                self.state = AssessmentState::for_band(band);
                self.prediction = Some(prediction);
                self.decision = Decision::Unset;
                Ok(band)
            }
            Err(e) => {
                warn!(error = %e, "prediction failed");
                self.state = AssessmentState::Idle;
                self.prediction = None;
                Err(AssessmentError::Prediction(e))
            }
        }
    }

    /// Run a whole submit cycle against `predictor`.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_submit`] and [`Self::complete_submit`].
    pub async fn submit(&mut self, predictor: &dyn Predict) -> Result<AnxietyBand, AssessmentError> {
        let input = self.begin_submit()?;
        let outcome = predictor.predict(&input).await;
        self.complete_submit(outcome)
    }

    /// Record the user's yes/no on the result view. Only the first answer
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns an error outside a result state, on a second answer, or for
    /// [`Decision::Unset`].
    pub fn decide(&mut self, decision: Decision) -> Result<AnxietyBand, AssessmentError> {
        let band = self.state.band().ok_or(AssessmentError::NoResult)?;
        if decision == Decision::Unset {
            return Err(AssessmentError::EmptyDecision);
        }
        if self.decision != Decision::Unset {
            return Err(AssessmentError::DecisionAlreadyMade);
        }
        self.decision = decision;
        info!(?band, ?decision, "decision recorded");
        Ok(band)
    }

    /// Back to an empty form: default vitals, no prediction, no decision.
    pub fn reset(&mut self) {
        self.vitals.reset();
        self.prediction = None;
        self.decision = Decision::Unset;
        self.state = AssessmentState::Idle;
    }
}

#[cfg(test)]
#[path = "assessment_test.rs"]
mod tests;
