use std::sync::Arc;

use mail_relay::{compose_contact_mail, MailAddressing, MailTransport};
use shared::{
    error::ApiError,
    protocol::{ContactAccepted, ContactPayload},
};
use tracing::{error, info};

pub const DELIVERED_MESSAGE: &str = "Email sent successfully";

#[derive(Clone)]
pub struct ApiContext {
    /// `None` when relay credentials were not configured at startup.
    pub relay: Option<Arc<dyn MailTransport>>,
    pub addressing: MailAddressing,
}

impl ApiContext {
    pub fn new(relay: Option<Arc<dyn MailTransport>>) -> Self {
        Self {
            relay,
            addressing: MailAddressing::default(),
        }
    }
}

/// Relays one contact submission. Single attempt, never retried.
pub async fn submit_contact(
    ctx: &ApiContext,
    payload: ContactPayload,
) -> Result<ContactAccepted, ApiError> {
    let fields = payload.into_fields().ok_or_else(ApiError::missing_fields)?;

    let Some(relay) = ctx.relay.as_ref() else {
        error!("mail relay credentials are not configured");
        return Err(ApiError::configuration());
    };

    let mail = compose_contact_mail(&ctx.addressing, &fields);
    relay.send(mail).await.map_err(|err| {
        error!(error = %err, "failed to relay contact message");
        ApiError::delivery()
    })?;

    info!("contact message relayed");
    Ok(ContactAccepted {
        message: DELIVERED_MESSAGE.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
