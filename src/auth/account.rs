//! Registered accounts, persisted as one JSON array.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::store::{ACCOUNTS_KEY, KeyValueStore, StoreError};

use super::AuthError;
use super::password::hash_password;

/// A registered account. Created on signup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string.
    pub password: String,
    pub created_at: String,
}

impl Account {
    /// Build a new account, hashing the password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::PasswordHash`] if hashing fails.
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, AuthError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            password: hash_password(password)?,
            created_at: super::timestamp_now(),
        })
    }
}

/// Append-only account list over the shared store.
#[derive(Clone)]
pub struct AccountStore {
    store: Arc<dyn KeyValueStore>,
}

impl AccountStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All accounts in registration order. A missing or corrupt entry reads
    /// as an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list(&self) -> Result<Vec<Account>, StoreError> {
        let Some(raw) = self.store.get(ACCOUNTS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(accounts) => Ok(accounts),
            Err(e) => {
                warn!(error = %e, "discarding corrupt account list");
                Ok(Vec::new())
            }
        }
    }

    /// Linear scan for an exact email match.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.list()?.into_iter().find(|a| a.email == email))
    }

    /// Append an account, refusing duplicate emails.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccountExists`] if the email is taken, or a store
    /// error if the list cannot be read or written.
    pub fn append(&self, account: Account) -> Result<(), AuthError> {
        let mut accounts = self.list()?;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AuthError::AccountExists);
        }
        accounts.push(account);
        let raw = serde_json::to_string(&accounts).map_err(StoreError::from)?;
        self.store.set(ACCOUNTS_KEY, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
