//! Application context and the top-level view-state machine.
//!
//! ARCHITECTURE
//! ============
//! `AppContext` carries the injected collaborators: the key-value store
//! behind accounts and session, the predictor, and the referral URL. `App`
//! owns the auth view and the assessment controller and exposes a single
//! [`App::dispatch`] entry point. Every user intent is an [`Action`];
//! actions that do not belong to the current view are rejected without
//! touching state.
//!
//! INVARIANT
//! =========
//! The visible [`View`] is derived from the auth screen and the assessment
//! state, never stored, so exactly one of login, signup, form, loading or
//! result is shown at any time.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::assessment::{AssessmentController, AssessmentError, AssessmentState, Decision};
use crate::auth::{AccountStore, AuthError, AuthScreen, AuthView, Authenticator, Session, SessionHolder, SignupForm};
use crate::config::{Config, DEFAULT_AUTH_DELAY_MS, DEFAULT_REFERRAL_URL};
use crate::prediction::{AnxietyBand, HttpPredictionClient, Predict, Prediction, PredictionError, PredictionInput};
use crate::recommendation::ResultView;
use crate::store::{FileStore, KeyValueStore, StoreError};
use crate::vitals::{FieldValue, VitalField, VitalsError};

// =============================================================================
// CONTEXT
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),
    #[error("failed to build prediction client: {0}")]
    Prediction(#[from] PredictionError),
}

/// Injected collaborators shared by the auth and assessment components.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn KeyValueStore>,
    pub predictor: Arc<dyn Predict>,
    pub referral_url: String,
    pub auth_delay: Duration,
}

impl AppContext {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, predictor: Arc<dyn Predict>) -> Self {
        Self {
            store,
            predictor,
            referral_url: DEFAULT_REFERRAL_URL.to_owned(),
            auth_delay: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
        }
    }

    /// Production wiring: file store in `config.data_dir`, HTTP predictor.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let store = FileStore::open(&config.data_dir)?;
        info!(path = %store.path().display(), "store opened");
        let predictor = HttpPredictionClient::new(config.predict_url.clone(), config.timeouts)?;
        Ok(Self {
            store: Arc::new(store),
            predictor: Arc::new(predictor),
            referral_url: config.referral_url.clone(),
            auth_delay: config.auth_delay,
        })
    }

    #[must_use]
    pub fn with_referral_url(mut self, url: impl Into<String>) -> Self {
        self.referral_url = url.into();
        self
    }

    #[must_use]
    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.auth_delay = delay;
        self
    }

    fn authenticator(&self) -> Authenticator {
        Authenticator::new(
            AccountStore::new(self.store.clone()),
            SessionHolder::new(self.store.clone()),
            self.auth_delay,
        )
    }
}

// =============================================================================
// VIEWS, ACTIONS, EFFECTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Signup,
    VitalsForm,
    Loading,
    Result(AnxietyBand),
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::VitalsForm => "vitals form",
            Self::Loading => "loading",
            Self::Result(AnxietyBand::Low) => "low anxiety result",
            Self::Result(AnxietyBand::High) => "high anxiety result",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShowSignup,
    ShowLogin,
    Login { email: String, password: String },
    Signup(SignupForm),
    Logout,
    UpdateField { field: VitalField, value: FieldValue },
    Submit,
    Decide(Decision),
    Reset,
}

impl Action {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowSignup => "show-signup",
            Self::ShowLogin => "show-login",
            Self::Login { .. } => "login",
            Self::Signup(_) => "signup",
            Self::Logout => "logout",
            Self::UpdateField { .. } => "update-field",
            Self::Submit => "submit",
            Self::Decide(_) => "decide",
            Self::Reset => "reset",
        }
    }

    fn allowed_in(&self, view: View) -> bool {
        match self {
            Self::ShowSignup | Self::Login { .. } => view == View::Login,
            Self::ShowLogin | Self::Signup(_) => view == View::Signup,
            Self::Logout => !matches!(view, View::Login | View::Signup),
            Self::UpdateField { .. } | Self::Submit => view == View::VitalsForm,
            Self::Decide(_) => matches!(view, View::Result(_)),
            Self::Reset => matches!(view, View::VitalsForm | View::Result(_)),
        }
    }
}

/// Outward-facing consequence of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-render the current view.
    Render,
    /// Leave the application for an external page.
    Redirect(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Vitals(#[from] VitalsError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("`{action}` is not available on the {view} view")]
    InvalidAction { action: &'static str, view: View },
}

impl AppError {
    /// Failed predictions interrupt the user; every other error is shown
    /// inline next to the form that caused it.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Assessment(AssessmentError::Prediction(_)))
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// APP
// =============================================================================

pub struct App {
    ctx: AppContext,
    auth: AuthView,
    assessment: AssessmentController,
}

impl App {
    /// Read the stored session once and pick the initial view.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn start(ctx: AppContext) -> Result<Self, StoreError> {
        let auth = AuthView::start(ctx.authenticator())?;
        Ok(Self { ctx, auth, assessment: AssessmentController::new() })
    }

    #[must_use]
    pub fn view(&self) -> View {
        match self.auth.screen() {
            AuthScreen::Login => View::Login,
            AuthScreen::Signup => View::Signup,
            AuthScreen::Authenticated => match self.assessment.state() {
                AssessmentState::Idle => View::VitalsForm,
                AssessmentState::Submitting => View::Loading,
                AssessmentState::ResultLowAnxiety => View::Result(AnxietyBand::Low),
                AssessmentState::ResultHighAnxiety => View::Result(AnxietyBand::High),
            },
        }
    }

    #[must_use]
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    /// Inline message on the login or signup form.
    #[must_use]
    pub fn auth_error(&self) -> Option<&str> {
        self.auth.error()
    }

    #[must_use]
    pub fn assessment(&self) -> &AssessmentController {
        &self.assessment
    }

    #[must_use]
    pub fn prediction(&self) -> Option<&Prediction> {
        self.assessment.prediction()
    }

    /// The result view for the current band and decision, if one is shown.
    #[must_use]
    pub fn result_view(&self) -> Option<ResultView> {
        let band = self.assessment.state().band()?;
        Some(ResultView::render(band, self.assessment.decision(), &self.ctx.referral_url))
    }

    /// Apply one user action.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidAction`] if the action does not belong to
    /// the current view, otherwise the failure of the underlying operation.
    /// The app is always left on an interactive view.
    pub async fn dispatch(&mut self, action: Action) -> Result<Effect, AppError> {
        self.check(&action)?;

        match action {
            Action::ShowSignup => self.auth.switch_to(AuthScreen::Signup),
            Action::ShowLogin => self.auth.switch_to(AuthScreen::Login),
            Action::Login { email, password } => {
                self.auth.login(&email, &password).await?;
            }
            Action::Signup(form) => {
                self.auth.signup(&form).await?;
            }
            Action::Logout => self.logout()?,
            Action::UpdateField { field, value } => self.assessment.update_field(field, value)?,
            Action::Submit => {
                let input = self.begin_submit()?;
                let outcome = self.ctx.predictor.predict(&input).await;
                self.complete_submit(outcome)?;
            }
            Action::Decide(decision) => {
                let band = self.assessment.decide(decision)?;
                if band == AnxietyBand::High && decision == Decision::Yes {
                    info!(url = %self.ctx.referral_url, "redirecting to referral");
                    return Ok(Effect::Redirect(self.ctx.referral_url.clone()));
                }
            }
            Action::Reset => self.assessment.reset(),
        }

        Ok(Effect::Render)
    }

    /// First half of a submit: move to the loading view and hand back the
    /// request body. Lets a front end render [`View::Loading`] while it
    /// awaits the predictor itself.
    ///
    /// # Errors
    ///
    /// Returns an error unless the vitals form is showing.
    pub fn begin_submit(&mut self) -> Result<PredictionInput, AppError> {
        self.check(&Action::Submit)?;
        Ok(self.assessment.begin_submit()?)
    }

    /// Second half of a submit.
    ///
    /// # Errors
    ///
    /// Returns a blocking [`AppError::Assessment`] if the prediction failed;
    /// the app is back on the vitals form.
    pub fn complete_submit(&mut self, outcome: Result<Prediction, PredictionError>) -> Result<AnxietyBand, AppError> {
        Ok(self.assessment.complete_submit(outcome)?)
    }

    fn check(&self, action: &Action) -> Result<(), AppError> {
        let view = self.view();
        if action.allowed_in(view) {
            Ok(())
        } else {
            Err(AppError::InvalidAction { action: action.name(), view })
        }
    }

    fn logout(&mut self) -> Result<(), StoreError> {
        self.assessment.reset();
        self.auth.logout()
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
