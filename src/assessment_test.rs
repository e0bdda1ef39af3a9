use super::*;
use crate::prediction::YesNo;
use crate::test_helpers::{ScriptedPredictor, prediction};

// =============================================================================
// Submit
// =============================================================================

#[tokio::test]
async fn score_below_five_is_low() {
    let mut c = AssessmentController::new();
    let band = c.submit(ScriptedPredictor::scores(&[4.9]).as_ref()).await.unwrap();
    assert_eq!(band, AnxietyBand::Low);
    assert_eq!(c.state(), AssessmentState::ResultLowAnxiety);
    assert_eq!(c.prediction().map(Prediction::score), Some(4.9));
}

#[tokio::test]
async fn score_of_exactly_five_is_high() {
    let mut c = AssessmentController::new();
    let band = c.submit(ScriptedPredictor::scores(&[5.0]).as_ref()).await.unwrap();
    assert_eq!(band, AnxietyBand::High);
    assert_eq!(c.state(), AssessmentState::ResultHighAnxiety);
}

#[tokio::test]
async fn submit_sends_current_vitals() {
    let mut c = AssessmentController::new();
    c.update_field(VitalField::Smoking, FieldValue::Flag(true)).unwrap();
    c.update_field(VitalField::HeartRate, FieldValue::Number(99.0)).unwrap();

    let predictor = ScriptedPredictor::scores(&[2.0]);
    c.submit(predictor.as_ref()).await.unwrap();

    let requests = predictor.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].smoking, YesNo::Yes);
    assert_eq!(requests[0].heart_rate, 99.0);
}

#[tokio::test]
async fn failed_request_returns_to_idle_with_vitals_intact() {
    let mut c = AssessmentController::new();
    c.update_field(VitalField::Caffeine, FieldValue::Number(350.0)).unwrap();
    let before = c.vitals().clone();

    let err = c.submit(ScriptedPredictor::failing().as_ref()).await.unwrap_err();
    assert!(matches!(err, AssessmentError::Prediction(PredictionError::ApiRequest(_))));
    assert_eq!(err.to_string(), PREDICTION_FAILED_NOTICE);
    assert_eq!(c.state(), AssessmentState::Idle);
    assert!(c.prediction().is_none());
    assert_eq!(c.vitals(), &before);
}

#[tokio::test]
async fn non_success_status_is_treated_as_failure() {
    let mut c = AssessmentController::new();
    let predictor = ScriptedPredictor::new(vec![Err(PredictionError::ApiResponse { status: 500, body: String::new() })]);
    assert!(c.submit(predictor.as_ref()).await.is_err());
    assert_eq!(c.state(), AssessmentState::Idle);
}

#[tokio::test]
async fn can_resubmit_after_failure() {
    let mut c = AssessmentController::new();
    let predictor = ScriptedPredictor::new(vec![
        Err(PredictionError::ApiParse("bad body".into())),
        Ok(prediction(8.0)),
    ]);
    assert!(c.submit(predictor.as_ref()).await.is_err());
    assert_eq!(c.submit(predictor.as_ref()).await.unwrap(), AnxietyBand::High);
    assert_eq!(predictor.request_count(), 2);
}

// =============================================================================
// Split submit
// =============================================================================

#[test]
fn begin_submit_enters_submitting() {
    let mut c = AssessmentController::new();
    let input = c.begin_submit().unwrap();
    assert_eq!(c.state(), AssessmentState::Submitting);
    assert_eq!(input, PredictionInput::from(&Vitals::default()));
}

#[test]
fn second_begin_while_submitting_is_rejected() {
    let mut c = AssessmentController::new();
    c.begin_submit().unwrap();
    assert!(matches!(c.begin_submit(), Err(AssessmentError::AlreadySubmitting)));
    assert_eq!(c.state(), AssessmentState::Submitting);
}

#[test]
fn begin_while_result_showing_is_rejected() {
    let mut c = AssessmentController::new();
    c.begin_submit().unwrap();
    c.complete_submit(Ok(prediction(1.0))).unwrap();
    assert!(matches!(c.begin_submit(), Err(AssessmentError::ResultShowing)));
}

#[test]
fn complete_without_begin_is_rejected() {
    let mut c = AssessmentController::new();
    assert!(matches!(c.complete_submit(Ok(prediction(1.0))), Err(AssessmentError::NotSubmitting)));
    assert_eq!(c.state(), AssessmentState::Idle);
    assert!(c.prediction().is_none());
}

#[test]
fn vitals_edit_during_flight_does_not_change_request() {
    let mut c = AssessmentController::new();
    let input = c.begin_submit().unwrap();
    c.update_field(VitalField::SleepHours, FieldValue::Number(9.0)).unwrap();
    assert_eq!(input.sleep_hours, 6.5);
    assert_eq!(c.vitals().sleep_hours, 9.0);
}

// =============================================================================
// Decision
// =============================================================================

#[test]
fn decide_outside_result_is_rejected() {
    let mut c = AssessmentController::new();
    assert!(matches!(c.decide(Decision::Yes), Err(AssessmentError::NoResult)));
}

#[test]
fn decide_once_only() {
    let mut c = AssessmentController::new();
    c.begin_submit().unwrap();
    c.complete_submit(Ok(prediction(2.0))).unwrap();

    assert_eq!(c.decide(Decision::Yes).unwrap(), AnxietyBand::Low);
    assert_eq!(c.decision(), Decision::Yes);
    assert!(matches!(c.decide(Decision::No), Err(AssessmentError::DecisionAlreadyMade)));
    assert_eq!(c.decision(), Decision::Yes);
}

#[test]
fn decide_unset_is_rejected() {
    let mut c = AssessmentController::new();
    c.begin_submit().unwrap();
    c.complete_submit(Ok(prediction(6.0))).unwrap();
    assert!(matches!(c.decide(Decision::Unset), Err(AssessmentError::EmptyDecision)));
}

#[tokio::test]
async fn new_prediction_clears_decision() {
    let mut c = AssessmentController::new();
    let predictor = ScriptedPredictor::scores(&[6.0, 3.0]);
    c.submit(predictor.as_ref()).await.unwrap();
    c.decide(Decision::No).unwrap();
    c.reset();
    c.submit(predictor.as_ref()).await.unwrap();
    assert_eq!(c.decision(), Decision::Unset);
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn reset_from_result_restores_everything() {
    let mut c = AssessmentController::new();
    c.update_field(VitalField::StressLevel, FieldValue::Number(10.0)).unwrap();
    c.submit(ScriptedPredictor::scores(&[7.5]).as_ref()).await.unwrap();
    c.decide(Decision::No).unwrap();

    c.reset();
    assert_eq!(c.state(), AssessmentState::Idle);
    assert_eq!(c.vitals(), &Vitals::default());
    assert!(c.prediction().is_none());
    assert_eq!(c.decision(), Decision::Unset);
}

#[test]
fn reset_while_submitting_drops_late_outcome() {
    let mut c = AssessmentController::new();
    c.begin_submit().unwrap();
    c.reset();
    assert!(matches!(c.complete_submit(Ok(prediction(9.0))), Err(AssessmentError::NotSubmitting)));
    assert_eq!(c.state(), AssessmentState::Idle);
}

#[test]
fn state_band_mapping() {
    assert_eq!(AssessmentState::Idle.band(), None);
    assert_eq!(AssessmentState::Submitting.band(), None);
    assert_eq!(AssessmentState::ResultLowAnxiety.band(), Some(AnxietyBand::Low));
    assert_eq!(AssessmentState::ResultHighAnxiety.band(), Some(AnxietyBand::High));
}
