use std::time::Duration;

use thiserror::Error;

/// Failure of a single-place weather lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Place name must not be blank")]
    EmptyPlace,

    #[error("Could not build weather URL for '{place}'")]
    InvalidUrl { place: String },

    #[error("Weather request for '{place}' failed")]
    Request {
        place: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Weather request for '{place}' failed with status {status}: {body}")]
    Status {
        place: String,
        status: u16,
        body: String,
    },

    #[error("Weather response for '{place}' is not valid JSON")]
    Parse {
        place: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather request for '{place}' timed out after {after:?}")]
    Timeout { place: String, after: Duration },
}

/// Failure of the platform location capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
