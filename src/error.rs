//! Error types for Cycle API operations.
//!
//! Application errors returned by the backend are not errors at this level:
//! they arrive as [`ApiResponse::Failure`](crate::ApiResponse::Failure).
//! [`CycleError`] covers everything that prevents a response from being
//! obtained or understood.

use thiserror::Error;

use crate::jsonapi::ErrorDetail;

/// Errors that can occur during Cycle API operations.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Configuration is missing or incomplete.
    #[error("Cycle configuration required: {0}")]
    ConfigMissing(String),

    /// An argument could not be used to build a request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backend answered with a structured error document.
    ///
    /// Only produced by [`ApiResponse::into_result`](crate::ApiResponse::into_result);
    /// the dispatcher itself reports these as `ApiResponse::Failure`.
    #[error("Cycle API error: {}", summarize(.errors))]
    ApiError { errors: Vec<ErrorDetail> },

    /// HTTP transport error (no response obtained).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

fn summarize(errors: &[ErrorDetail]) -> String {
    match errors {
        [] => "no error details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Result type alias for Cycle operations.
pub type Result<T> = core::result::Result<T, CycleError>;
