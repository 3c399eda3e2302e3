//! Client (customer) model.

use serde::{Deserialize, Serialize};

use super::serde_helpers::{blank_to_none, default_true};

/// A registered customer.
///
/// Clients are never hard-deleted from the dashboard; deactivation flips
/// `is_active` server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Wire shape of a client as the backend sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ClientWire {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<ClientWire> for Client {
    fn from(wire: ClientWire) -> Self {
        Client {
            id: wire.id,
            name: wire.name,
            email: blank_to_none(wire.email),
            phone: blank_to_none(wire.phone),
            is_active: wire.is_active,
        }
    }
}

/// Payload for creating a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial update payload for a client. Only the provided fields change.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_contact_fields_become_none() {
        let wire: ClientWire = serde_json::from_str(
            r#"{"id": 1, "name": "Ana Rojas", "email": "", "phone": "  "}"#,
        )
        .unwrap();
        let client = Client::from(wire);
        assert_eq!(client.email, None);
        assert_eq!(client.phone, None);
        assert!(client.is_active);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<ClientWire, _> =
            serde_json::from_str(r#"{"id": 1, "name": "Ana", "loyaltyTier": "gold"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn partial_update_serializes_only_provided_fields() {
        let update = UpdateClient {
            phone: Some("+56911112222".to_string()),
            ..UpdateClient::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"phone":"+56911112222"}"#);
    }
}
