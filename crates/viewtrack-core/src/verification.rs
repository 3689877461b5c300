//! View-token verification for events received from elsewhere.
//!
//! A verifier holding the install salt recomputes the token an event should
//! carry from its raw identifying fields and compares it to the `vt` entry.

use viewtrack_canonical::{PublicationId, Tokenizer};

use crate::events::{page_view_token_input, Event, EventType};
use crate::payload::keys;

/// Outcome of checking an event's view token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationVerdict {
    /// The carried token matches the recomputed one.
    Ok,
    /// The carried token differs from the recomputed one.
    Mismatch {
        /// Token recomputed from the payload.
        expected: String,
        /// Token found in the payload.
        actual: String,
    },
    /// The event type requires a token but none is present.
    Missing,
    /// The event type must not carry a token but one is present.
    Unexpected,
    /// The event type carries no token.
    NotTokenized,
    /// A field needed to recompute the token is missing or has the wrong type.
    Invalid(String),
}

impl VerificationVerdict {
    /// Whether the event passed verification (including events without tokens).
    pub fn is_ok(&self) -> bool {
        matches!(self, VerificationVerdict::Ok | VerificationVerdict::NotTokenized)
    }
}

/// Checks the `vt` entry of `event` against `tokenizer`.
pub fn verify_view_token(event: &Event, tokenizer: &Tokenizer) -> VerificationVerdict {
    let payload = event.payload();
    let actual = payload.get(keys::VIEW_TOKEN);

    let expected = match event.event_type() {
        EventType::PagedPublicationOpened => {
            required_str(event, keys::PUBLICATION_ID).map(|id| tokenizer.tokenize(id))
        }
        EventType::PagedPublicationPageOpened => {
            required_str(event, keys::PUBLICATION_ID).and_then(|id| {
                let page = payload
                    .get_int(keys::PAGE_NUMBER)
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| invalid_field(keys::PAGE_NUMBER))?;
                let input = page_view_token_input(&PublicationId::new(id), page);
                Ok(tokenizer.tokenize_bytes(&input))
            })
        }
        EventType::OfferOpened => {
            required_str(event, keys::OFFER_ID).map(|id| tokenizer.tokenize(id))
        }
        EventType::Searched => {
            required_str(event, keys::SEARCH_QUERY).map(|q| tokenizer.tokenize(q))
        }
        EventType::PotentialLocalBusinessVisit => {
            required_str(event, keys::STORE_ID).map(|id| tokenizer.tokenize(id))
        }
        EventType::OfferOpenedAfterSearch => {
            return if actual.is_some() {
                VerificationVerdict::Unexpected
            } else {
                VerificationVerdict::NotTokenized
            };
        }
        EventType::Dummy | EventType::ClientSessionOpened | EventType::Other(_) => {
            return VerificationVerdict::NotTokenized;
        }
    };

    let expected = match expected {
        Ok(token) => token,
        Err(verdict) => return verdict,
    };

    match actual.map(|value| value.as_str()) {
        None => VerificationVerdict::Missing,
        Some(None) => invalid_field(keys::VIEW_TOKEN),
        Some(Some(actual)) if actual == expected.as_str() => VerificationVerdict::Ok,
        Some(Some(actual)) => VerificationVerdict::Mismatch {
            expected: expected.into_string(),
            actual: actual.to_owned(),
        },
    }
}

fn required_str<'a>(event: &'a Event, key: &str) -> Result<&'a str, VerificationVerdict> {
    event
        .payload()
        .get_str(key)
        .ok_or_else(|| invalid_field(key))
}

fn invalid_field(key: &str) -> VerificationVerdict {
    VerificationVerdict::Invalid(format!("missing or malformed payload field '{key}'"))
}
