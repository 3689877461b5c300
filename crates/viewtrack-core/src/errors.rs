use thiserror::Error;

/// Core error types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Event JSON could not be encoded or decoded.
    #[error("event JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
