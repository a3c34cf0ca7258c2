//! Discriminated success/failure result of an API call.

use crate::error::{CycleError, Result};
use crate::jsonapi::ErrorDetail;

/// Outcome of a request that reached the backend.
///
/// The backend either returned the expected document or a list of
/// structured errors; never both. Transport faults are not represented
/// here, they surface as `Err(CycleError::HttpError)` from the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// 2xx response parsed as the expected document.
    Success { document: T },
    /// Non-2xx response; always carries at least one error.
    Failure { errors: Vec<ErrorDetail> },
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResponse::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The document, if the call succeeded.
    pub fn document(&self) -> Option<&T> {
        match self {
            ApiResponse::Success { document } => Some(document),
            ApiResponse::Failure { .. } => None,
        }
    }

    /// The errors, empty if the call succeeded.
    pub fn errors(&self) -> &[ErrorDetail] {
        match self {
            ApiResponse::Success { .. } => &[],
            ApiResponse::Failure { errors } => errors,
        }
    }

    pub fn into_document(self) -> Option<T> {
        match self {
            ApiResponse::Success { document } => Some(document),
            ApiResponse::Failure { .. } => None,
        }
    }

    /// Transform the document of a successful response.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        match self {
            ApiResponse::Success { document } => ApiResponse::Success {
                document: f(document),
            },
            ApiResponse::Failure { errors } => ApiResponse::Failure { errors },
        }
    }

    /// Convert into a `Result`, turning a failure into [`CycleError::ApiError`].
    ///
    /// # Errors
    ///
    /// Returns the backend's errors when the response is a failure.
    pub fn into_result(self) -> Result<T> {
        match self {
            ApiResponse::Success { document } => Ok(document),
            ApiResponse::Failure { errors } => Err(CycleError::ApiError { errors }),
        }
    }
}
