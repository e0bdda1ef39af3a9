//! Local key-value store.
//!
//! DESIGN
//! ======
//! Accounts and the current session live under two string keys, each
//! holding a JSON-encoded value. The trait is synchronous: every read and
//! write completes before the caller continues. `MemoryStore` backs tests
//! and throwaway runs; `FileStore` persists to a single JSON file.
//!
//! TRADE-OFFS
//! ==========
//! No schema versioning and no cross-process locking. Two processes writing
//! the same file race; the last full rewrite wins.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the JSON array of registered accounts.
pub const ACCOUNTS_KEY: &str = "vitalSenseUsers";

/// Key holding the JSON-encoded current session.
pub const SESSION_KEY: &str = "vitalSenseCurrentUser";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

// =============================================================================
// TRAIT
// =============================================================================

/// String-keyed, string-valued storage shared by the account store and the
/// session holder.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
