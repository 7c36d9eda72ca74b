use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::ErrorBody;

pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const CONFIGURATION_MESSAGE: &str = "Server configuration error";
pub const DELIVERY_MESSAGE: &str = "Failed to send email. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    MissingFields,
    Configuration,
    Delivery,
}

impl ErrorCode {
    /// Client-caused failures; everything else is on the server side.
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorCode::InvalidRequest | ErrorCode::MissingFields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
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

    pub fn invalid_request() -> Self {
        Self::new(ErrorCode::InvalidRequest, INVALID_REQUEST_MESSAGE)
    }

    pub fn missing_fields() -> Self {
        Self::new(ErrorCode::MissingFields, MISSING_FIELDS_MESSAGE)
    }

    pub fn configuration() -> Self {
        Self::new(ErrorCode::Configuration, CONFIGURATION_MESSAGE)
    }

    pub fn delivery() -> Self {
        Self::new(ErrorCode::Delivery, DELIVERY_MESSAGE)
    }
}

impl From<ApiError> for ErrorBody {
    fn from(value: ApiError) -> Self {
        Self {
            error: value.message,
        }
    }
}
