//! Centralized error types for the SkyCast application.
//!
//! Provider failures (weather, air quality, news) have their own taxonomy in
//! `skycast-weather`; this module covers the ambient concerns: configuration,
//! persisted session state and I/O.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Service-level errors (weather, news) mapped from provider crates.
    #[error("Service error: {0}")]
    Service(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Recover the typed error behind an `anyhow` chain, falling back to `Other`.
    pub fn classify(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ConfigError>() {
            Ok(e) => return AppError::Config(e),
            Err(err) => err,
        };
        let err = match err.downcast::<StoreError>() {
            Ok(e) => return AppError::Store(e),
            Err(err) => err,
        };
        match err.downcast::<std::io::Error>() {
            Ok(e) => AppError::Io(e),
            Err(err) => AppError::Other(err),
        }
    }

    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Store(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Service(_) => "Something went wrong. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No platform configuration directory")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "Could not locate a folder for settings.",
            ConfigError::Invalid(_) => "Invalid configuration. Check config.toml.",
            ConfigError::Parse(_) => "config.toml could not be read. Fix or delete it.",
        }
    }
}

/// Persisted key-value state errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read session file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write session file: {0}")]
    Write(#[source] std::io::Error),

    #[error("Session file is corrupted: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl StoreError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::Read(_) => "Could not restore your last location.",
            StoreError::Write(_) => "Could not remember this location.",
            StoreError::Corrupt(_) => "Saved location data was unreadable and has been ignored.",
        }
    }
}
