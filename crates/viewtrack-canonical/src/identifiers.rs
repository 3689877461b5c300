use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw value. Content identifiers are opaque and carried as given.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the raw value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if s.is_empty() {
                    return Err(ValidationError::Empty {
                        field: stringify!($name),
                    });
                }
                static PATTERN: std::sync::OnceLock<Option<Regex>> = std::sync::OnceLock::new();
                let matches = PATTERN
                    .get_or_init(|| Regex::new($pattern).ok())
                    .as_ref()
                    .is_some_and(|re| re.is_match(&s));
                if !matches {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Returns the raw value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    AppId,
    "Application identifier supplied at configuration (pattern: `[A-Za-z0-9][A-Za-z0-9_.:-]{0,127}`).",
    r"^[A-Za-z0-9][A-Za-z0-9_.:-]{0,127}$"
);
newtype!(
    EventId,
    "Opaque per-occurrence event identifier. Never derived from event content.",
    r"^\S{1,128}$"
);
newtype!(PublicationId, "Identifier of a paged publication (a collection).");
newtype!(OfferId, "Identifier of an offer (an item).");
newtype!(StoreId, "Identifier of a physical store (a place).");
newtype!(DealerId, "Identifier of the dealer owning a store.");

impl EventId {
    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}
