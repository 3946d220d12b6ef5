use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocale {
    pub locale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// A client registered to a user account.
///
/// The same record shape describes the signed-in account and every client
/// linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClient {
    pub client_id: ClientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default)]
    pub locales: Vec<UserLocale>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserClient {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: ClientId::new(client_id),
            email: None,
            username: None,
            age: None,
            gender: None,
            locales: Vec::new(),
            visible: false,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sparse_record_with_defaults() {
        let client: UserClient =
            serde_json::from_str(r#"{"client_id":"c-1","email":"a@example.com"}"#)
                .expect("decode");
        assert_eq!(client.client_id.as_str(), "c-1");
        assert_eq!(client.email.as_deref(), Some("a@example.com"));
        assert!(client.locales.is_empty());
        assert!(!client.visible);
        assert!(client.created_at.is_none());
    }

    #[test]
    fn omits_absent_optionals_when_encoding() {
        let value = serde_json::to_value(UserClient::new("c-2")).expect("encode");
        assert_eq!(value["client_id"], "c-2");
        assert!(value.get("email").is_none());
        assert_eq!(value["locales"], serde_json::json!([]));
    }
}
