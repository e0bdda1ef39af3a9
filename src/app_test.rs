use std::sync::Arc;

use super::*;
use crate::recommendation::{HIGH_ANXIETY_TIPS, ResultBody};
use crate::store::{MemoryStore, SESSION_KEY};
use crate::test_helpers::ScriptedPredictor;

const REFERRAL: &str = "https://referral.test";

fn context(kv: &Arc<MemoryStore>, predictor: Arc<ScriptedPredictor>) -> AppContext {
    AppContext::new(kv.clone(), predictor)
        .with_referral_url(REFERRAL)
        .with_auth_delay(Duration::ZERO)
}

fn signup_form() -> SignupForm {
    SignupForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
    }
}

async fn signed_in(predictor: Arc<ScriptedPredictor>) -> (App, Arc<MemoryStore>) {
    let kv = Arc::new(MemoryStore::new());
    let mut app = App::start(context(&kv, predictor)).unwrap();
    app.dispatch(Action::ShowSignup).await.unwrap();
    app.dispatch(Action::Signup(signup_form())).await.unwrap();
    (app, kv)
}

// =============================================================================
// Startup and auth views
// =============================================================================

#[tokio::test]
async fn starts_on_login_without_session() {
    let kv = Arc::new(MemoryStore::new());
    let app = App::start(context(&kv, ScriptedPredictor::scores(&[]))).unwrap();
    assert_eq!(app.view(), View::Login);
    assert!(app.session().is_none());
}

#[tokio::test]
async fn restores_session_on_start() {
    let (_, kv) = signed_in(ScriptedPredictor::scores(&[])).await;
    let app = App::start(context(&kv, ScriptedPredictor::scores(&[]))).unwrap();
    assert_eq!(app.view(), View::VitalsForm);
    assert_eq!(app.session().map(|s| s.name.as_str()), Some("Ada"));
}

#[tokio::test]
async fn signup_lands_on_vitals_form() {
    let (app, _) = signed_in(ScriptedPredictor::scores(&[])).await;
    assert_eq!(app.view(), View::VitalsForm);
}

#[tokio::test]
async fn failed_login_stays_on_login_with_message() {
    let kv = Arc::new(MemoryStore::new());
    let mut app = App::start(context(&kv, ScriptedPredictor::scores(&[]))).unwrap();

    let err = app
        .dispatch(Action::Login { email: "nobody@example.com".into(), password: "secret1".into() })
        .await
        .unwrap_err();

    assert!(!err.is_blocking());
    assert_eq!(err.user_message(), "Invalid email or password");
    assert_eq!(app.view(), View::Login);
    assert_eq!(app.auth_error(), Some("Invalid email or password"));
}

#[tokio::test]
async fn logout_returns_to_login_and_clears_session() {
    let (mut app, kv) = signed_in(ScriptedPredictor::scores(&[7.0])).await;
    app.dispatch(Action::Submit).await.unwrap();

    app.dispatch(Action::Logout).await.unwrap();

    assert_eq!(app.view(), View::Login);
    assert_eq!(kv.get(SESSION_KEY).unwrap(), None);
    assert!(app.prediction().is_none());
    assert_eq!(app.assessment().state(), AssessmentState::Idle);
}

// =============================================================================
// Assessment flow
// =============================================================================

#[tokio::test]
async fn logout_while_loading_drops_late_prediction() {
    let (mut app, kv) = signed_in(ScriptedPredictor::scores(&[])).await;
    app.begin_submit().unwrap();
    assert_eq!(app.view(), View::Loading);

    app.dispatch(Action::Logout).await.unwrap();
    assert_eq!(app.view(), View::Login);
    assert_eq!(kv.get(SESSION_KEY).unwrap(), None);

    let late = app.complete_submit(Ok(crate::test_helpers::prediction(9.0)));
    assert!(matches!(late, Err(AppError::Assessment(AssessmentError::NotSubmitting))));
    assert_eq!(app.view(), View::Login);
    assert!(app.prediction().is_none());
    assert_eq!(app.assessment().state(), AssessmentState::Idle);
}

#[tokio::test]
async fn submit_shows_result_for_band() {
    let (mut app, _) = signed_in(ScriptedPredictor::scores(&[3.2])).await;
    app.dispatch(Action::Submit).await.unwrap();
    assert_eq!(app.view(), View::Result(AnxietyBand::Low));
}

#[tokio::test]
async fn loading_view_between_begin_and_complete() {
    let (mut app, _) = signed_in(ScriptedPredictor::scores(&[])).await;

    app.begin_submit().unwrap();
    assert_eq!(app.view(), View::Loading);
    assert!(matches!(
        app.dispatch(Action::Submit).await,
        Err(AppError::InvalidAction { action: "submit", view: View::Loading })
    ));

    app.complete_submit(Ok(crate::test_helpers::prediction(8.0))).unwrap();
    assert_eq!(app.view(), View::Result(AnxietyBand::High));
}

#[tokio::test]
async fn failed_prediction_is_blocking_and_returns_to_form() {
    let (mut app, _) = signed_in(ScriptedPredictor::failing()).await;

    let err = app.dispatch(Action::Submit).await.unwrap_err();

    assert!(err.is_blocking());
    assert_eq!(err.user_message(), crate::assessment::PREDICTION_FAILED_NOTICE);
    assert_eq!(app.view(), View::VitalsForm);
}

#[tokio::test]
async fn high_yes_redirects_to_referral() {
    let (mut app, _) = signed_in(ScriptedPredictor::scores(&[6.0])).await;
    app.dispatch(Action::Submit).await.unwrap();

    let effect = app.dispatch(Action::Decide(Decision::Yes)).await.unwrap();

    assert_eq!(effect, Effect::Redirect(REFERRAL.into()));
}

#[tokio::test]
async fn high_no_shows_tips() {
    let (mut app, _) = signed_in(ScriptedPredictor::scores(&[6.0])).await;
    app.dispatch(Action::Submit).await.unwrap();

    let effect = app.dispatch(Action::Decide(Decision::No)).await.unwrap();

    assert_eq!(effect, Effect::Render);
    let view = app.result_view().unwrap();
    assert!(matches!(view.body, ResultBody::Tips { tips, .. } if tips == HIGH_ANXIETY_TIPS));
}

#[tokio::test]
async fn reset_clears_result_and_vitals() {
    let (mut app, _) = signed_in(ScriptedPredictor::scores(&[6.0])).await;
    app.dispatch(Action::UpdateField { field: VitalField::HeartRate, value: FieldValue::Number(110.0) })
        .await
        .unwrap();
    app.dispatch(Action::Submit).await.unwrap();

    app.dispatch(Action::Reset).await.unwrap();

    assert_eq!(app.view(), View::VitalsForm);
    assert!(app.prediction().is_none());
    assert!(app.result_view().is_none());
    assert_eq!(app.assessment().vitals().get(VitalField::HeartRate), FieldValue::Number(78.0));
}

// =============================================================================
// View guards
// =============================================================================

#[tokio::test]
async fn actions_outside_their_view_are_rejected() {
    let kv = Arc::new(MemoryStore::new());
    let predictor = ScriptedPredictor::scores(&[1.0]);
    let mut app = App::start(context(&kv, predictor.clone())).unwrap();

    for action in [Action::Submit, Action::Logout, Action::Reset, Action::Decide(Decision::Yes)] {
        let err = app.dispatch(action).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidAction { view: View::Login, .. }));
    }
    assert_eq!(predictor.request_count(), 0);
    assert_eq!(app.view(), View::Login);
}

#[tokio::test]
async fn form_edits_are_rejected_on_result_view() {
    let (mut app, _) = signed_in(ScriptedPredictor::scores(&[2.0])).await;
    app.dispatch(Action::Submit).await.unwrap();

    let err = app
        .dispatch(Action::UpdateField { field: VitalField::Smoking, value: FieldValue::Flag(true) })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidAction { action: "update-field", .. }));
    assert_eq!(err.to_string(), "`update-field` is not available on the low anxiety result view");
}
