use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    Validation,
    Unavailable,
    Internal,
}

/// Error payload as returned by the booking API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 | 403 => ErrorCode::Unauthorized,
            404 => ErrorCode::NotFound,
            400 | 422 => ErrorCode::Validation,
            502 | 503 | 504 => ErrorCode::Unavailable,
            _ => ErrorCode::Internal,
        };
        Self::new(code, message)
    }
}

impl From<ApiException> for ApiError {
    fn from(value: ApiException) -> Self {
        Self {
            code: value.code,
            message: value.message,
        }
    }
}
