//! Contact form submission: local validation, one request to the delivery
//! endpoint, and the resulting `idle/loading/success/error` status.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{ContactFields, SubmissionStatus},
    protocol::{contact_route, ContactAccepted, ContactPayload, ErrorBody},
    validation::validate,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::SubmitError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Sending,
    Sent,
    Failed(String),
}

impl Notification {
    pub fn title(&self) -> &str {
        match self {
            Notification::Sending => "Sending message...",
            Notification::Sent => "Message sent successfully!",
            Notification::Failed(message) => message.as_str(),
        }
    }

    pub fn description(&self) -> Option<&'static str> {
        match self {
            Notification::Sent => {
                Some("Thank you for reaching out. I will get back to you soon.")
            }
            _ => None,
        }
    }
}

/// Transient user-visible feedback (toast surface).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match &notification {
            Notification::Failed(message) => warn!(%message, "contact submission failed"),
            other => info!(
                title = other.title(),
                description = other.description().unwrap_or_default(),
                "contact submission"
            ),
        }
    }
}

#[async_trait]
pub trait ContactEndpoint: Send + Sync {
    async fn deliver(&self, fields: &ContactFields) -> Result<ContactAccepted, SubmitError>;
}

pub struct HttpContactEndpoint {
    http: Client,
    url: Url,
}

impl HttpContactEndpoint {
    pub fn new(base_url: &str) -> Result<Self, SubmitError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let url = Url::parse(base_url)?.join(contact_route())?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ContactEndpoint for HttpContactEndpoint {
    async fn deliver(&self, fields: &ContactFields) -> Result<ContactAccepted, SubmitError> {
        debug!(url = %self.url, "posting contact message");
        let response = self
            .http
            .post(self.url.clone())
            .json(&ContactPayload::from(fields))
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice::<ContactAccepted>(&body)
                .map_err(|_| SubmitError::MalformedResponse);
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error)
            .filter(|error| !error.is_empty());
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    pub fields: ContactFields,
    status: SubmissionStatus,
    error_message: Option<String>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(ContactFields::default())
    }
}

impl ContactForm {
    pub fn new(fields: ContactFields) -> Self {
        Self {
            fields,
            status: SubmissionStatus::Idle,
            error_message: None,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Present only while `status` is `Error`.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Inputs and the submit control are disabled while a request is in flight.
    pub fn inputs_enabled(&self) -> bool {
        self.status != SubmissionStatus::Loading
    }

    /// Validates and moves to `Loading`, returning the fields to send.
    pub fn begin_submit(&mut self) -> Result<ContactFields, SubmitError> {
        if self.status == SubmissionStatus::Loading {
            return Err(SubmitError::InFlight);
        }
        self.error_message = None;
        if let Err(err) = validate(&self.fields) {
            self.status = SubmissionStatus::Error;
            self.error_message = Some(err.to_string());
            return Err(err.into());
        }
        self.status = SubmissionStatus::Loading;
        Ok(self.fields.clone())
    }

    /// Applies the endpoint outcome and returns the notification to show.
    pub fn finish(&mut self, outcome: Result<ContactAccepted, SubmitError>) -> Notification {
        match outcome {
            Ok(accepted) => {
                info!(confirmation = %accepted.message, "contact message delivered");
                self.status = SubmissionStatus::Success;
                self.error_message = None;
                self.fields.clear();
                Notification::Sent
            }
            Err(err) => {
                warn!(error = %err, "contact message not delivered");
                let message = err.user_message();
                self.status = SubmissionStatus::Error;
                self.error_message = Some(message.clone());
                Notification::Failed(message)
            }
        }
    }

    pub async fn submit(
        &mut self,
        endpoint: &dyn ContactEndpoint,
        notifier: &dyn Notifier,
    ) -> SubmissionStatus {
        let fields = match self.begin_submit() {
            Ok(fields) => fields,
            Err(SubmitError::InFlight) => return self.status,
            Err(err) => {
                notifier.notify(Notification::Failed(err.user_message()));
                return self.status;
            }
        };

        notifier.notify(Notification::Sending);
        let outcome = endpoint.deliver(&fields).await;
        notifier.notify(self.finish(outcome));
        self.status
    }
}

#[cfg(test)]
#[path = "tests/contact_tests.rs"]
mod tests;
