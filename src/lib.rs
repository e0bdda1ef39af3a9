//! VitalSense: account-gated anxiety self-assessment.
//!
//! ARCHITECTURE
//! ============
//! - `store`: string key-value persistence (file-backed or in-memory).
//! - `auth`: accounts, the current session and the login/signup view.
//! - `vitals`: the fifteen-field assessment record and its widget metadata.
//! - `prediction`: request/response types and the HTTP scoring client.
//! - `assessment`: idle, submitting and result states around one request.
//! - `recommendation`: result text chosen by band and the user's answer.
//! - `app`: injected context plus a single `dispatch` over all of the above.
//! - `config`: environment-driven settings.

pub mod app;
pub mod assessment;
pub mod auth;
pub mod config;
pub mod prediction;
pub mod recommendation;
pub mod store;
pub mod vitals;

#[cfg(test)]
mod test_helpers;
