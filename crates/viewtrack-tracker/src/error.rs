//! Error types for salt storage and tracker configuration.

use thiserror::Error;
use viewtrack_canonical::TokenizerError;

use crate::config::ConfigurationError;

/// Errors that can occur during salt store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("salt store lock poisoned")]
    Poisoned,
    /// The key cannot be used by this backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    /// A salt was persisted but is empty.
    #[error("persisted salt under '{key}' is empty")]
    CorruptSalt {
        /// Storage key holding the salt.
        key: String,
    },
    /// Other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Error returned by an [`EventSink`](crate::EventSink) that refused an event.
#[derive(Error, Debug)]
#[error("event sink rejected event: {0}")]
pub struct SinkError(pub String);

/// Errors that stop tracking from starting or an event from being handed off.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Settings were invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The salt store failed.
    #[error("salt store error: {0}")]
    Store(#[from] StoreError),
    /// The tokenizer could not be built from the stored salt.
    #[error("tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    /// The event sink refused an event.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
