//! Analytics event records for viewtrack.
//!
//! This crate provides:
//! - [`Event`], an immutable, versioned record of one user action
//! - Named constructors for each tracked action, which pseudonymize
//!   identifying fields through a [`Tokenizer`](viewtrack_canonical::Tokenizer)
//! - [`Payload`], a flat map of scalar [`EventValue`]s
//! - View-token verification for events received from elsewhere
//!
//! Core invariants:
//! - Event ids identify the occurrence, never the content
//! - Every event carries [`SCHEMA_VERSION`]
//! - Optional fields are omitted from the payload, not set to empty values
//!
#![deny(missing_docs)]

/// Error types for core operations.
pub mod errors;
/// Event types and constructors.
pub mod events;
/// Payload map and scalar values.
pub mod payload;
/// View-token verification.
pub mod verification;

pub use errors::CoreError;
pub use events::{
    page_view_token_input, Event, EventType, RECENT_INTERACTION_THRESHOLD, SCHEMA_VERSION,
};
pub use payload::{keys, EventValue, Payload};
pub use verification::{verify_view_token, VerificationVerdict};
