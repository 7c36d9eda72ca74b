use super::*;
use crate::{compose_contact_mail, MailAddressing};
use shared::domain::ContactFields;

fn mail_for(email: &str) -> OutgoingMail {
    compose_contact_mail(
        &MailAddressing::default(),
        &ContactFields::new("Ada", email, "Hello"),
    )
}

#[test]
fn built_message_carries_reply_to_and_subject() {
    let message = build_message(&mail_for("ada@example.org")).expect("message");
    let formatted = String::from_utf8(message.formatted()).expect("utf8");
    assert!(formatted.contains("Reply-To: ada@example.org"));
    assert!(formatted.contains("To: hello@mandip.dev"));
    assert!(formatted.contains("contact@mandip.dev"));
    assert!(formatted.contains("Subject: Portfolio Contact: Ada"));
    assert!(formatted.contains("multipart/alternative"));
}

#[test]
fn unparseable_reply_to_is_an_address_error() {
    let err = build_message(&mail_for("not an address")).expect_err("should fail");
    match err {
        RelayError::InvalidAddress { address, .. } => assert_eq!(address, "not an address"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn display_name_cannot_smuggle_a_recipient() {
    let err = build_message(&mail_for("Eve <eve@example.org>")).expect_err("should fail");
    assert!(matches!(err, RelayError::InvalidAddress { .. }));
}

#[tokio::test]
async fn relay_builds_without_connecting() {
    let relay = SmtpRelay::new(&SmtpRelayConfig {
        host: DEFAULT_SMTP_HOST.to_string(),
        port: DEFAULT_SMTP_PORT,
        credentials: RelayCredentials {
            username: "user".into(),
            password: "secret".into(),
        },
    });
    assert!(relay.is_ok());
}

#[test]
fn credentials_require_both_non_empty_values() {
    assert!(RelayCredentials::from_parts(Some("u".into()), Some("p".into())).is_some());
    assert!(RelayCredentials::from_parts(Some("u".into()), None).is_none());
    assert!(RelayCredentials::from_parts(Some(String::new()), Some("p".into())).is_none());
}

#[test]
fn credentials_debug_hides_password() {
    let creds = RelayCredentials {
        username: "user".into(),
        password: "hunter2".into(),
    };
    let rendered = format!("{creds:?}");
    assert!(rendered.contains("user"));
    assert!(!rendered.contains("hunter2"));
}
