//! Core error types for lifeline-core.
//!
//! Only two failures abort an activation outright: a missing profile
//! and a denied authentication gate. Everything else is downgraded at
//! its origin and recorded as an outcome so the dispatch pipeline can
//! keep going.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lifeline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Activation-level errors
    #[error("Activation error: {0}")]
    Activation(#[from] ActivationError),

    /// Local persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Profile validation errors
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Remote directory errors
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

impl CoreError {
    /// Shorthand for a free-form error message.
    pub fn custom(message: impl Into<String>) -> Self {
        CoreError::Custom(message.into())
    }
}

/// Errors that abort an SOS activation.
///
/// `NoProfile` and `AuthDenied` fire before any journal entry exists;
/// a denied attempt leaves no trace in the event history.
#[derive(Error, Debug)]
pub enum ActivationError {
    /// Trigger attempted with no registered user.
    #[error("No user profile registered; cannot activate SOS")]
    NoProfile,

    /// The authentication gate denied the trigger.
    #[error("Authentication denied; SOS not activated")]
    AuthDenied,

    /// Automated trigger attempted while auto-SOS is not permitted.
    #[error("Automated SOS trigger is not permitted by current settings")]
    AutoTriggerDenied,

    /// Cancellation semantics are deliberately unimplemented.
    #[error("SOS cancellation is not supported")]
    CancelUnsupported,

    /// The pre-dispatch journal write failed; without the "triggered"
    /// record there is no audit trail, so the activation aborts.
    #[error("Failed to journal SOS event: {0}")]
    Storage(#[from] StorageError),
}

/// Local persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the local database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read/write against the kv store failed
    #[error("Store access failed: {0}")]
    AccessFailed(String),

    /// Stored record could not be decoded
    #[error("Corrupt record under key '{key}': {message}")]
    CorruptRecord { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(String),
}

/// Errors a location provider may report.
///
/// These never leave the acquirer: every variant is downgraded to an
/// absent position.
#[derive(Error, Debug)]
pub enum LocationError {
    /// Positioning permission was denied
    #[error("Location permission denied")]
    PermissionDenied,

    /// No fix within the requested timeout
    #[error("Location fix timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Provider-specific failure
    #[error("Location provider error: {0}")]
    Provider(String),
}

/// Profile validation errors.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The emergency contact list is capped
    #[error("Contact limit reached (maximum {max})")]
    ContactLimitReached { max: usize },

    /// Index outside the contact list
    #[error("No contact at index {index} (length: {len})")]
    ContactOutOfBounds { index: usize, len: usize },
}

/// Remote directory errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Transport-level failure
    #[error("Directory request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The directory rejected the request
    #[error("Directory rejected request: {status}")]
    Rejected { status: u16 },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::AccessFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
