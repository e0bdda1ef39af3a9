//! Authentication error types.

use crate::store::StoreError;

use super::validation::SignupError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Validation(#[from] SignupError),

    #[error("An account with this email already exists")]
    AccountExists,

    #[error("password hashing failed")]
    PasswordHash,

    #[error("account storage failed: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// The single message shown on the auth form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::PasswordHash | Self::Store(_) => "Something went wrong. Please try again.".to_owned(),
            other => other.to_string(),
        }
    }

    /// Whether the failure came from user input rather than the system.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::Validation(_) | Self::AccountExists)
    }
}
