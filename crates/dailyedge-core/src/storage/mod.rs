//! Durable storage: the key-value backends, the daily snapshot store and
//! the TOML configuration file.

mod config;
pub mod database;
pub mod memory;
pub mod state_store;

pub use config::{
    ClockConfig, Config, StorageConfig, TimerConfig, MAX_TARGET_MINUTES, MIN_TARGET_MINUTES,
};
pub use database::Database;
pub use memory::MemoryStore;
pub use state_store::{StateStore, DEFAULT_STORAGE_KEY};

use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// A flat string-to-string store, the only durable medium the engine writes to.
pub trait KvStore {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/dailyedge/`, creating it if needed.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dailyedge");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
