//! Tracker settings supplied by the host application.

use serde::Deserialize;
use thiserror::Error;
use viewtrack_canonical::{AppId, ValidationError};

/// Environment variable read by [`TrackerSettings::from_env`].
pub const APP_ID_ENV: &str = "VIEWTRACK_APP_ID";

/// Configuration errors. Tracking does not start when one occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The application identifier is empty or malformed.
    #[error("invalid app id: {0}")]
    InvalidAppId(#[source] ValidationError),
}

/// Settings for the events tracker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSettings {
    /// Application identifier stamped on every tracked event.
    pub app_id: AppId,
}

impl TrackerSettings {
    /// Builds settings, validating the application identifier.
    pub fn new(app_id: &str) -> Result<Self, ConfigurationError> {
        let app_id = AppId::parse(app_id).map_err(ConfigurationError::InvalidAppId)?;
        Ok(Self { app_id })
    }

    /// Builds settings from [`APP_ID_ENV`]. An unset variable counts as empty.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let app_id = std::env::var(APP_ID_ENV).unwrap_or_default();
        Self::new(&app_id)
    }
}
