use std::collections::HashMap;

use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

use crate::domain::ContactFields;

pub fn contact_route() -> &'static str {
    "/api/contact"
}

/// Body of `POST /api/contact` as it arrives over the wire.
///
/// Every field is optional here so that a request missing one of them can be
/// answered with a 400 instead of a parse failure. Only a JSON object is
/// accepted, and a value that is not a string counts as missing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum FieldValue {
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for ContactPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut object = HashMap::<String, FieldValue>::deserialize(deserializer)?;
        let mut text = |key: &str| match object.remove(key) {
            Some(FieldValue::Text(value)) => Some(value),
            Some(FieldValue::Other(_)) | None => None,
        };
        Ok(Self {
            name: text("name"),
            email: text("email"),
            message: text("message"),
        })
    }
}

impl ContactPayload {
    /// Returns the fields when all three are present and non-empty.
    pub fn into_fields(self) -> Option<ContactFields> {
        let name = self.name.filter(|v| !v.is_empty())?;
        let email = self.email.filter(|v| !v.is_empty())?;
        let message = self.message.filter(|v| !v.is_empty())?;
        Some(ContactFields {
            name,
            email,
            message,
        })
    }
}

impl From<&ContactFields> for ContactPayload {
    fn from(fields: &ContactFields) -> Self {
        Self {
            name: Some(fields.name.clone()),
            email: Some(fields.email.clone()),
            message: Some(fields.message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAccepted {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_with_empty_field_is_incomplete() {
        let payload: ContactPayload =
            serde_json::from_str(r#"{"name":"Ada","email":"","message":"hi"}"#).expect("json");
        assert!(payload.into_fields().is_none());
    }

    #[test]
    fn payload_with_null_or_absent_field_is_incomplete() {
        let payload: ContactPayload =
            serde_json::from_str(r#"{"name":null,"email":"a@b.com"}"#).expect("json");
        assert!(payload.into_fields().is_none());
    }

    #[test]
    fn non_string_values_count_as_missing() {
        for body in [
            r#"{"name":"Ada","email":"a@b.com","message":0}"#,
            r#"{"name":"Ada","email":"a@b.com","message":true}"#,
            r#"{"name":["Ada"],"email":"a@b.com","message":"hi"}"#,
            r#"{"name":"Ada","email":{"addr":"a@b.com"},"message":"hi"}"#,
        ] {
            let payload: ContactPayload = serde_json::from_str(body).expect(body);
            assert!(payload.into_fields().is_none(), "{body}");
        }
    }

    #[test]
    fn non_object_body_is_still_a_parse_failure() {
        assert!(serde_json::from_str::<ContactPayload>("[1,2,3]").is_err());
        assert!(serde_json::from_str::<ContactPayload>("\"hi\"").is_err());
    }

    #[test]
    fn whitespace_only_values_still_count_as_present() {
        let payload: ContactPayload =
            serde_json::from_str(r#"{"name":" ","email":"a@b.com","message":"hi"}"#)
                .expect("json");
        let fields = payload.into_fields().expect("complete");
        assert_eq!(fields.name, " ");
    }

    #[test]
    fn fields_serialize_as_flat_object() {
        let fields = ContactFields::new("Ada", "a@b.com", "hi");
        let value = serde_json::to_value(ContactPayload::from(&fields)).expect("json");
        assert_eq!(
            value,
            serde_json::json!({ "name": "Ada", "email": "a@b.com", "message": "hi" })
        );
    }
}
