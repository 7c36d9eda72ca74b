use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

mod compose;
pub mod smtp;

pub use compose::{compose_contact_mail, escape_html};
pub use smtp::{SmtpRelay, SmtpRelayConfig};

pub const SENDER_NAME: &str = "Portfolio Contact Form";
pub const SENDER_ADDRESS: &str = "contact@mandip.dev";
pub const RECIPIENT_ADDRESS: &str = "hello@mandip.dev";

/// Fixed envelope addressing. Nothing from a submission ever lands here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddressing {
    pub sender_name: String,
    pub sender_address: String,
    pub recipient: String,
}

impl Default for MailAddressing {
    fn default() -> Self {
        Self {
            sender_name: SENDER_NAME.into(),
            sender_address: SENDER_ADDRESS.into(),
            recipient: RECIPIENT_ADDRESS.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from_name: String,
    pub from_address: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct RelayCredentials {
    pub username: String,
    pub password: String,
}

impl RelayCredentials {
    /// Both values must be present and non-empty.
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|v| !v.is_empty())?;
        let password = password.filter(|v| !v.is_empty())?;
        Some(Self { username, password })
    }
}

impl fmt::Debug for RelayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid mail address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("failed to build mail message: {0}")]
    Build(String),
    #[error("relay transport failure: {0}")]
    Transport(String),
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError>;
}
