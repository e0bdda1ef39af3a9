//! Signup form validation.
//!
//! Rules run in a fixed order and the first failure wins, so the user only
//! ever sees one message at a time.

use std::sync::LazyLock;

use regex::Regex;

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Raw signup input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignupError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Validate a signup form: name, then email format, then password length,
/// then confirmation.
///
/// # Errors
///
/// Returns the first rule that fails.
pub fn validate_signup(form: &SignupForm) -> Result<(), SignupError> {
    if utf16_len(&form.name) < MIN_NAME_LEN {
        return Err(SignupError::NameTooShort);
    }
    if !is_valid_email(&form.email) {
        return Err(SignupError::InvalidEmail);
    }
    if utf16_len(&form.password) < MIN_PASSWORD_LEN {
        return Err(SignupError::PasswordTooShort);
    }
    if form.password != form.confirm_password {
        return Err(SignupError::PasswordMismatch);
    }
    Ok(())
}

/// Length in UTF-16 code units, the unit browser form fields count in.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
