//! The single current session, persisted under its own key.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::{KeyValueStore, SESSION_KEY, StoreError};

use super::Account;

/// The authenticated identity. At most one exists per store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub name: String,
    pub login_time: String,
}

impl Session {
    /// Start a session for `account`, stamped with the current time.
    #[must_use]
    pub fn for_account(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
            login_time: super::timestamp_now(),
        }
    }
}

#[derive(Clone)]
pub struct SessionHolder {
    store: Arc<dyn KeyValueStore>,
}

impl SessionHolder {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the stored session. A corrupt entry is removed and reads as none.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the corrupt entry
    /// cannot be removed.
    pub fn load(&self) -> Result<Option<Session>, StoreError> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "discarding corrupt stored session");
                self.store.remove(SESSION_KEY)?;
                Ok(None)
            }
        }
    }

    /// Persist `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        self.store.set(SESSION_KEY, &raw)
    }

    /// Destroy the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
