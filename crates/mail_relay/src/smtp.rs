//! SMTP implementation of [`MailTransport`] backed by `lettre`.

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use crate::{MailTransport, OutgoingMail, RelayCredentials, RelayError};

pub const DEFAULT_SMTP_HOST: &str = "mail.smtp2go.com";
pub const DEFAULT_SMTP_PORT: u16 = 2525;

#[derive(Debug, Clone)]
pub struct SmtpRelayConfig {
    pub host: String,
    pub port: u16,
    pub credentials: RelayCredentials,
}

pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpRelay {
    /// Plain connection upgraded with STARTTLS when the relay offers it.
    pub fn new(config: &SmtpRelayConfig) -> Result<Self, RelayError> {
        let tls = TlsParameters::new(config.host.clone())
            .map_err(|e| RelayError::Transport(format!("tls parameters: {e}")))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.host.as_str())
            .port(config.port)
            .tls(Tls::Opportunistic(tls))
            .credentials(Credentials::new(
                config.credentials.username.clone(),
                config.credentials.password.clone(),
            ))
            .build();
        Ok(Self {
            transport,
            host: config.host.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        let message = build_message(&mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        debug!(host = %self.host, subject = %mail.subject, "relay accepted message");
        Ok(())
    }
}

pub fn build_message(mail: &OutgoingMail) -> Result<Message, RelayError> {
    let from = Mailbox::new(Some(mail.from_name.clone()), parse_address(&mail.from_address)?);
    let to = Mailbox::new(None, parse_address(&mail.to)?);
    let reply_to = Mailbox::new(None, parse_address(&mail.reply_to)?);

    Message::builder()
        .from(from)
        .to(to)
        .reply_to(reply_to)
        .subject(mail.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            mail.text_body.clone(),
            mail.html_body.clone(),
        ))
        .map_err(|e| RelayError::Build(e.to_string()))
}

fn parse_address(raw: &str) -> Result<Address, RelayError> {
    raw.parse::<Address>()
        .map_err(|e| RelayError::InvalidAddress {
            address: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "tests/smtp_tests.rs"]
mod tests;
