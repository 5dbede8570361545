//! DTOs for a user-management REST API.
//!
//! Field names follow the API's `snake_case` JSON. Optional fields are
//! [`Field`]s so a client can tell a key the server omitted from one it
//! cleared.

use veneer_dto::{AdditionalProperties, Dto, Field};

/// An email address attached to a user.
#[derive(Debug, Clone, PartialEq, Dto)]
pub struct EmailAddress {
    /// Identifier, `idn_...`.
    pub id: Field<String>,
    /// The address itself.
    pub email_address: Field<String>,
    /// Whether the address was verified.
    pub verified: Field<bool>,
    /// Whether this is the user's primary address.
    pub primary: Field<bool>,
    /// Keys this client does not know about.
    #[dto(additional)]
    pub additional_properties: AdditionalProperties,
}

impl EmailAddress {
    /// Creates an address with only the address set.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: Field::Unset,
            email_address: Field::Value(address.into()),
            verified: Field::Unset,
            primary: Field::Unset,
            additional_properties: AdditionalProperties::new(),
        }
    }
}

/// A user of the instance.
#[derive(Debug, Clone, PartialEq, Dto)]
pub struct User {
    /// Identifier, `user_...`.
    pub id: String,
    /// Login name; `null` when the instance does not use usernames.
    pub username: Field<String>,
    /// Every attached address.
    #[dto(default)]
    pub email_addresses: Vec<EmailAddress>,
    /// Identifier of the primary address.
    pub primary_email_address_id: Field<String>,
    /// Unix milliseconds.
    pub created_at: i64,
    /// Whether sign-in is blocked.
    #[dto(rename = "banned")]
    pub is_banned: Field<bool>,
    /// Keys this client does not know about.
    #[dto(additional)]
    pub additional_properties: AdditionalProperties,
}

impl User {
    /// Returns the address whose id is the primary address id.
    #[must_use]
    pub fn primary_email(&self) -> Option<&EmailAddress> {
        let primary = self.primary_email_address_id.value()?;
        self.email_addresses
            .iter()
            .find(|email| email.id.value() == Some(primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use veneer_dto::DtoError;

    fn payload() -> serde_json::Value {
        json!({
            "id": "user_2x",
            "username": null,
            "email_addresses": [
                {"id": "idn_1", "email_address": "a@example.com", "verified": true, "linked_to": []},
                {"id": "idn_2", "email_address": "b@example.com", "verified": false}
            ],
            "primary_email_address_id": "idn_1",
            "created_at": 1_700_000_000_000_i64,
            "banned": false,
            "public_metadata": {"plan": "pro"}
        })
    }

    #[test]
    fn decodes_api_payload() {
        let user = User::from_json(payload()).unwrap();

        assert_eq!(user.username, Field::Null);
        assert_eq!(user.is_banned, Field::Value(false));
        assert_eq!(user["public_metadata"], json!({"plan": "pro"}));
        assert_eq!(user.email_addresses[0]["linked_to"], json!([]));
        assert!(user.email_addresses[1].primary.is_unset());
        assert_eq!(
            user.primary_email().and_then(|e| e.email_address.value()),
            Some(&"a@example.com".to_string())
        );
    }

    #[test]
    fn round_trip_is_lossless() {
        let user = User::from_json(payload()).unwrap();
        assert_eq!(user.to_json(), payload());
    }

    #[test]
    fn missing_id_is_reported() {
        let mut payload = payload();
        if let Some(map) = payload.as_object_mut() {
            map.remove("id");
        }
        assert_eq!(
            User::from_json(payload).unwrap_err(),
            DtoError::MissingField("id".to_string())
        );
    }

    #[test]
    fn new_address_encodes_only_the_address() {
        let email = EmailAddress::new("c@example.com");
        assert_eq!(email.to_json(), json!({"email_address": "c@example.com"}));
    }
}
