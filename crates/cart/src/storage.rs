//! Durable key-value storage for cart records.
//!
//! The cart persists its items as a JSON array under an identity-scoped key:
//! `cart_<userId>` for an authenticated user, [`ANONYMOUS_CART_KEY`] otherwise.
//! Both keys may exist in storage at the same time; the store only ever reads
//! and writes the key for its currently-active identity (plus the one-shot
//! anonymous-cart transfer on sign-in).
//!
//! The [`CartStorage`] trait deals in raw JSON strings so that backends stay
//! format-agnostic; serialization and the fail-soft handling of malformed
//! records belong to the store itself.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use duka_core::UserId;
use thiserror::Error;

/// Storage key for the anonymous (signed-out) cart.
pub const ANONYMOUS_CART_KEY: &str = "cart_anonymous";

/// Storage key for the given identity.
///
/// `Some(user)` maps to `cart_<userId>`, `None` to [`ANONYMOUS_CART_KEY`].
#[must_use]
pub fn cart_key(identity: Option<&UserId>) -> String {
    identity.map_or_else(
        || ANONYMOUS_CART_KEY.to_string(),
        |user| format!("cart_{user}"),
    )
}

/// Errors that can occur in a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (disk full, permissions, quota).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable key-value storage for JSON cart records.
///
/// Implementations are expected to behave like browser local storage: a flat
/// origin-scoped namespace of string values that survives restarts. All
/// operations are synchronous; callers treat them as instantaneous local
/// operations.
pub trait CartStorage: Send {
    /// Fetch the record at `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the record at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the record at `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the delete fails.
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage backend.
///
/// Used by tests and short-lived embedders; contents vanish on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, bypassing the store. Test convenience.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.records.insert(key.to_string(), value.to_string());
    }

    /// Whether a record exists at `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.records.remove(key);
        Ok(())
    }
}

/// File-backed storage: one `<key>.json` file per record under a root
/// directory.
///
/// Keys are used directly as file names, so identities must be path-safe;
/// the identity provider issues UUID-style IDs, which are.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// The root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.record_path(key), value)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
