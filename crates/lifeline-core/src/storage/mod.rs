//! Local persistence.
//!
//! Everything the app keeps on device -- profile, settings, SOS
//! history -- lives in an opaque string-keyed store, each record
//! serialized as self-describing JSON. The production store is a
//! SQLite kv table; tests use the in-memory variant.

mod database;
mod memory;

pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;
use crate::profile::User;
use crate::settings::Settings;

/// Key for the registered user profile.
pub const USER_KEY: &str = "sos_user";
/// Key for the settings record.
pub const SETTINGS_KEY: &str = "sos_settings";
/// Key for the SOS event history.
pub const HISTORY_KEY: &str = "sos_history";

/// Opaque string-keyed persistence.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/lifeline[-dev]/` based on LIFELINE_ENV.
///
/// Set LIFELINE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LIFELINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lifeline-dev")
    } else {
        base_dir.join("lifeline")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Load the registered user, if any.
pub fn load_user(store: &dyn Store) -> Result<Option<User>, StorageError> {
    decode(store, USER_KEY)
}

/// Persist the user profile.
pub fn save_user(store: &dyn Store, user: &User) -> Result<(), StorageError> {
    encode(store, USER_KEY, user)
}

/// Load settings, falling back to defaults when none are stored.
pub fn load_settings(store: &dyn Store) -> Result<Settings, StorageError> {
    Ok(decode(store, SETTINGS_KEY)?.unwrap_or_default())
}

/// Persist the settings record.
pub fn save_settings(store: &dyn Store, settings: &Settings) -> Result<(), StorageError> {
    encode(store, SETTINGS_KEY, settings)
}

fn decode<T: serde::de::DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::CorruptRecord {
                key: key.to_string(),
                message: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn encode<T: serde::Serialize>(
    store: &dyn Store,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::CorruptRecord {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set(key, &json)
}
