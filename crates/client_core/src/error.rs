use shared::validation::ValidationError;
use thiserror::Error;

use crate::contact::GENERIC_FAILURE_MESSAGE;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("contact endpoint answered {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("contact request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("contact endpoint returned a malformed response")]
    MalformedResponse,
    #[error("invalid contact endpoint url: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("a submission is already in flight")]
    InFlight,
}

impl SubmitError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(err) => err.to_string(),
            SubmitError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
