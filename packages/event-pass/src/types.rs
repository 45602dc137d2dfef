//! Records exchanged with the identity, event and pass services.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque event identifier, usually taken from a route parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wrap a raw identifier. Returns `None` for a missing or empty value,
    /// which the resolver treats as "no identifier".
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some(id) if !id.is_empty() => Some(Self(id.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The signed-in viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub identity_provider: String,
    pub user_id: String,
    /// Display name shown next to the pass
    #[serde(default)]
    pub user_details: String,
    #[serde(default)]
    pub user_roles: Vec<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, user_details: impl Into<String>) -> Self {
        Self {
            identity_provider: String::new(),
            user_id: user_id.into(),
            user_details: user_details.into(),
            user_roles: Vec::new(),
        }
    }
}

/// Envelope returned by the auth endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub client_principal: Option<Identity>,
}

/// An event as returned by the event service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    /// Remaining fields, kept as-is for the rendering layer
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl EventRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            metadata: Map::new(),
        }
    }
}

/// An access pass owned by the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    pub id: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl PassRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Map::new(),
        }
    }
}

/// Envelope returned by the pass endpoint. A `null` pass means the viewer
/// has none yet.
#[derive(Debug, Clone, Deserialize)]
pub struct PassResponse {
    pub pass: Option<PassRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_rejects_missing_and_empty() {
        assert_eq!(EventId::parse(None), None);
        assert_eq!(EventId::parse(Some("")), None);
        assert_eq!(EventId::parse(Some("evt-1")).unwrap().as_str(), "evt-1");
    }

    #[test]
    fn test_auth_response_with_null_principal() {
        let body: AuthResponse = serde_json::from_str(r#"{"clientPrincipal":null}"#).unwrap();
        assert!(body.client_principal.is_none());
    }

    #[test]
    fn test_auth_response_with_principal() {
        let body: AuthResponse = serde_json::from_str(
            r#"{"clientPrincipal":{"identityProvider":"github","userId":"u1","userDetails":"octocat","userRoles":["anonymous","authenticated"]}}"#,
        )
        .unwrap();
        let identity = body.client_principal.unwrap();
        assert_eq!(identity.user_details, "octocat");
        assert_eq!(identity.user_roles.len(), 2);
    }

    #[test]
    fn test_event_record_keeps_extra_fields() {
        let event: EventRecord =
            serde_json::from_str(r#"{"id":"evt-1","name":"Launch","venue":"Hall A"}"#).unwrap();
        assert_eq!(event.name, "Launch");
        assert_eq!(event.metadata["venue"], "Hall A");
    }

    #[test]
    fn test_pass_response_null_pass() {
        let body: PassResponse = serde_json::from_str(r#"{"pass":null}"#).unwrap();
        assert!(body.pass.is_none());
    }
}
