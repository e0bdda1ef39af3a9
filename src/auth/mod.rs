//! Local account authentication.
//!
//! ARCHITECTURE
//! ============
//! `AccountStore` and `SessionHolder` are thin typed views over the shared
//! key-value store. `Authenticator` combines them into the login, signup
//! and logout operations, and `AuthView` tracks which auth screen is shown.
//!
//! SECURITY
//! ========
//! Passwords are stored as salted Argon2id hashes. Login failures report a
//! single generic message whether the email is unknown or the password is
//! wrong, so the form cannot be used to probe for registered addresses.

pub mod account;
pub mod error;
pub mod password;
pub mod session;
pub mod validation;
pub mod view;

pub use account::{Account, AccountStore};
pub use error::AuthError;
pub use session::{Session, SessionHolder};
pub use validation::{SignupError, SignupForm, validate_signup};
pub use view::{AuthScreen, AuthView, Authenticator};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Current UTC time as an RFC 3339 string.
pub(crate) fn timestamp_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}
