//! Salt lifecycle and tracker configuration for viewtrack.
//!
//! This crate provides:
//! - The [`SaltStore`] capability hosts implement to persist the install salt
//! - In-memory and file-backed stores
//! - [`load_or_create_salt`], which creates the salt once and reuses it forever
//! - [`EventsTracker`], which wires settings and a salt into a ready tokenizer
//!   and hands prepared events to an [`EventSink`]

#![deny(missing_docs)]

/// Tracker settings.
pub mod config;
/// Error types for store and tracker operations.
pub mod error;
/// File-backed salt store.
pub mod file;
/// In-memory salt store.
pub mod memory;
/// Install salt generation and loading.
pub mod salt;
/// Event hand-off boundary.
pub mod sink;
/// Configured tracker.
pub mod tracker;
/// Storage capability traits.
pub mod traits;

pub use config::{ConfigurationError, TrackerSettings, APP_ID_ENV};
pub use error::{SinkError, StoreError, TrackerError};
pub use file::FileSaltStore;
pub use memory::MemorySaltStore;
pub use salt::{generate_salt, load_or_create_salt, GENERATED_SALT_LEN, SALT_STORAGE_KEY};
pub use sink::{EventSink, MemorySink};
pub use tracker::EventsTracker;
pub use traits::SaltStore;
