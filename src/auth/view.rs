//! Login / signup screens and the operations behind them.
//!
//! DESIGN
//! ======
//! `AuthScreen` is the auth state machine: `Login` and `Signup` toggle
//! freely, either one moves to `Authenticated` on success, and logout
//! returns to `Login`. Failures leave the screen unchanged and record one
//! message for the form to show.

use std::time::Duration;

use tracing::{info, warn};

use crate::store::StoreError;

use super::{Account, AccountStore, AuthError, Session, SessionHolder, SignupForm, validate_signup};
use super::password::verify_password;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScreen {
    #[default]
    Login,
    Signup,
    Authenticated,
}

// =============================================================================
// AUTHENTICATOR
// =============================================================================

/// Account operations over the injected stores.
#[derive(Clone)]
pub struct Authenticator {
    accounts: AccountStore,
    sessions: SessionHolder,
    delay: Duration,
}

impl Authenticator {
    /// `delay` is awaited before each credential check to mimic a remote
    /// round trip. Pass `Duration::ZERO` to skip it.
    #[must_use]
    pub fn new(accounts: AccountStore, sessions: SessionHolder, delay: Duration) -> Self {
        Self { accounts, sessions, delay }
    }

    #[must_use]
    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// Read the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(&self) -> Result<Option<Session>, StoreError> {
        self.sessions.load()
    }

    /// Check credentials and start a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email or a
    /// wrong password, or a store error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.simulate_latency().await;

        let account = self
            .accounts
            .find_by_email(email)?
            .filter(|a| verify_password(password, &a.password));

        let Some(account) = account else {
            warn!(%email, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let session = Session::for_account(&account);
        self.sessions.save(&session)?;
        info!(%email, "login succeeded");
        Ok(session)
    }

    /// Validate the form, register the account and start a session.
    ///
    /// # Errors
    ///
    /// Returns the first failing validation rule, [`AuthError::AccountExists`]
    /// for a taken email, or a store/hashing error.
    pub async fn signup(&self, form: &SignupForm) -> Result<Session, AuthError> {
        validate_signup(form)?;
        self.simulate_latency().await;

        if self.accounts.find_by_email(&form.email)?.is_some() {
            return Err(AuthError::AccountExists);
        }

        let account = Account::new(&form.name, &form.email, &form.password)?;
        self.accounts.append(account.clone())?;

        let session = Session::for_account(&account);
        self.sessions.save(&session)?;
        info!(email = %account.email, "account created");
        Ok(session)
    }

    /// Destroy the persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.sessions.clear()?;
        info!("logged out");
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

// =============================================================================
// AUTH VIEW
// =============================================================================

/// Current auth screen, session and pending form error.
pub struct AuthView {
    auth: Authenticator,
    screen: AuthScreen,
    session: Option<Session>,
    error: Option<String>,
}

impl AuthView {
    /// Start on `Authenticated` when a stored session exists, else `Login`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn start(auth: Authenticator) -> Result<Self, StoreError> {
        let session = auth.restore()?;
        let screen = if session.is_some() { AuthScreen::Authenticated } else { AuthScreen::Login };
        if let Some(s) = &session {
            info!(email = %s.email, "restored session");
        }
        Ok(Self { auth, screen, session, error: None })
    }

    #[must_use]
    pub fn screen(&self) -> AuthScreen {
        self.screen
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Message from the last failed login or signup on this screen.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.screen == AuthScreen::Authenticated
    }

    /// Switch between the login and signup forms. Ignored once authenticated.
    pub fn switch_to(&mut self, screen: AuthScreen) {
        if self.is_authenticated() || screen == AuthScreen::Authenticated {
            return;
        }
        self.screen = screen;
        self.error = None;
    }

    /// # Errors
    ///
    /// See [`Authenticator::login`]. The screen stays on `Login` on failure.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, AuthError> {
        self.error = None;
        match self.auth.login(email, password).await {
            Ok(session) => Ok(self.enter(session)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// # Errors
    ///
    /// See [`Authenticator::signup`]. The screen stays on `Signup` on failure.
    pub async fn signup(&mut self, form: &SignupForm) -> Result<&Session, AuthError> {
        self.error = None;
        match self.auth.signup(form).await {
            Ok(session) => Ok(self.enter(session)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Drop the session and return to the login form.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored session cannot be removed; the view
    /// still returns to `Login`.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.session = None;
        self.screen = AuthScreen::Login;
        self.error = None;
        self.auth.logout()
    }

    fn fail(&mut self, e: AuthError) -> AuthError {
        if !e.is_user_error() {
            warn!(error = %e, "auth request failed");
        }
        self.error = Some(e.user_message());
        e
    }

    fn enter(&mut self, session: Session) -> &Session {
        self.screen = AuthScreen::Authenticated;
        self.session.insert(session)
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
