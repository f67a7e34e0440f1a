use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the caller of a dish or order pipeline.
///
/// The display text is the message that ends up in the error body, so the
/// variants carry the full sentence rather than a fragment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Missing or malformed field, mismatched id, or an illegal status change.
    #[error("{0}")]
    Validation(String),
    /// Unknown dish or order id.
    #[error("{0}")]
    NotFound(String),
    /// The resource has no pipeline for the requested operation.
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
    /// A mutator found the store in a state its checks should have ruled out.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error payload shape: `{ "status": 400, "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// HTTP-style status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::ActorCommunication(_) | ApiError::Internal(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status(),
            message: self.to_string(),
        }
    }
}
