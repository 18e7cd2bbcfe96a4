//! Local key/value storage for the persisted cart snapshot.
//!
//! Storage is string-keyed and string-valued, the same contract a browser's
//! local storage offers. Reads and writes are synchronous: a mutation is not
//! committed until its snapshot write has returned.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a value could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refuses writes.
    #[error("Storage is read-only, cannot write key {0}")]
    ReadOnly(String),
}

/// A string key/value store.
pub trait SnapshotStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be durably written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
