//! Salted view tokens.
//!
//! A view token is computed as `base64(md5(salt || input)[..8])` using the
//! standard base64 alphabet with padding. The salt is a per-install secret and
//! is never part of the output, so a token cannot be mapped back to its input
//! without it.

use std::fmt;

use base64::Engine;
use md5::{Digest as Md5Digest, Md5};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// Number of leading digest bytes kept in a token.
pub const TOKEN_DIGEST_PREFIX_LEN: usize = 8;

/// Length of an encoded token (`TOKEN_DIGEST_PREFIX_LEN` bytes in padded base64).
const TOKEN_ENCODED_LEN: usize = 12;

/// Error raised when a tokenizer cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// The salt was empty.
    #[error("tokenizer salt must not be empty")]
    EmptySalt,
}

/// Pseudonymous token derived from an identifying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    /// Parses a token received from elsewhere, checking its shape.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let well_formed = value.len() == TOKEN_ENCODED_LEN
            && value.ends_with('=')
            && base64::engine::general_purpose::STANDARD
                .decode(&value)
                .map(|bytes| bytes.len() == TOKEN_DIGEST_PREFIX_LEN)
                .unwrap_or(false);
        if !well_formed {
            return Err(ValidationError::PatternMismatch {
                field: "Token",
                value,
            });
        }
        Ok(Self(value))
    }

    /// Returns the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Token {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

/// Deterministic, salt-keyed pseudonymization function.
///
/// A tokenizer is bound to exactly one salt for its whole lifetime and holds no
/// other state, so it can be cloned freely and shared across threads.
///
/// # Example
///
/// ```rust
/// use viewtrack_canonical::Tokenizer;
///
/// let tokenizer = Tokenizer::new("salty")?;
/// assert_eq!(tokenizer.tokenize("pub1").as_str(), "HUdC076YIL8=");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Tokenizer {
    salt: String,
}

impl Tokenizer {
    /// Builds a tokenizer bound to `salt`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::EmptySalt`] if `salt` is empty.
    pub fn new(salt: impl Into<String>) -> Result<Self, TokenizerError> {
        let salt = salt.into();
        if salt.is_empty() {
            return Err(TokenizerError::EmptySalt);
        }
        Ok(Self { salt })
    }

    /// Tokenizes the UTF-8 bytes of `input`.
    ///
    /// No normalization is applied: case, whitespace and Unicode form all
    /// change the result.
    pub fn tokenize(&self, input: &str) -> Token {
        self.tokenize_bytes(input.as_bytes())
    }

    /// Tokenizes an arbitrary byte string, for inputs composed of several fields.
    pub fn tokenize_bytes(&self, input: &[u8]) -> Token {
        let mut hasher = Md5::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(input);
        let digest = hasher.finalize();

        Token(
            base64::engine::general_purpose::STANDARD
                .encode(&digest[..TOKEN_DIGEST_PREFIX_LEN]),
        )
    }
}

// The salt is a secret; keep it out of logs.
impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("salt", &"<redacted>")
            .finish()
    }
}
