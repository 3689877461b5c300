//! Canonical primitives for viewtrack analytics events.
//!
//! This crate owns the pieces every other crate agrees on byte-for-byte:
//! the salted view-token [`Tokenizer`], the identifier newtypes carried in
//! event payloads, and the whole-second [`EventTimestamp`].
//!
#![deny(missing_docs)]

/// Core identifiers and newtypes used in event payloads.
pub mod identifiers;
/// Whole-second event timestamps.
pub mod timestamp;
/// Salted view-token tokenizer.
pub mod token;
/// Validation helpers used by canonical types.
pub mod validation;

pub use identifiers::{AppId, DealerId, EventId, OfferId, PublicationId, StoreId};
pub use timestamp::EventTimestamp;
pub use token::{Token, Tokenizer, TokenizerError, TOKEN_DIGEST_PREFIX_LEN};
pub use validation::ValidationError;
