use std::collections::HashMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Claim carrying the user's email address.
pub const EMAIL_CLAIM: &str = "email";

/// Claim carrying the user's numeric identifier (as a string).
pub const ID_CLAIM: &str = "id";

/// Claim names that callers may not use for extra claims.
pub const RESERVED_CLAIMS: [&str; 9] = [
    EMAIL_CLAIM,
    ID_CLAIM,
    "iss",
    "aud",
    "exp",
    "iat",
    "nbf",
    "jti",
    "sub",
];

/// Access token claims.
///
/// Issued tokens always carry `email` and `id`; registered claims (`iss`,
/// `aud`, `exp`, `iat`) sit beside them and any additional fields land in
/// `extra`. Decoding tolerates a missing `email` or `id` so callers can tell a
/// well-signed token without a usable identity apart from a malformed one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(default)]
    pub email: String,

    /// User identifier; numeric JSON values are read as their decimal text
    #[serde(
        default,
        deserialize_with = "id_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for a user with no registered claims set.
    pub fn for_user(user_id: i64, email: impl ToString) -> Self {
        Self {
            email: email.to_string(),
            id: Some(user_id.to_string()),
            iss: None,
            aud: None,
            exp: None,
            iat: None,
            extra: HashMap::new(),
        }
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: impl ToString) -> Self {
        self.aud = Some(aud.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Add a custom string claim.
    pub fn with_extra(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.extra.insert(
            key.to_string(),
            serde_json::Value::String(value.to_string()),
        );
        self
    }

    /// Parse the `id` claim as an integer.
    pub fn user_id(&self) -> Option<i64> {
        self.id.as_deref()?.parse().ok()
    }

    /// Every claim in the token rendered as a string.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = self
            .extra
            .iter()
            .map(|(name, value)| (name.clone(), value_to_string(value)))
            .collect();

        map.insert(EMAIL_CLAIM.to_string(), self.email.clone());
        if let Some(id) = &self.id {
            map.insert(ID_CLAIM.to_string(), id.clone());
        }

        if let Some(iss) = &self.iss {
            map.insert("iss".to_string(), iss.clone());
        }
        if let Some(aud) = &self.aud {
            map.insert("aud".to_string(), aud.clone());
        }
        if let Some(exp) = self.exp {
            map.insert("exp".to_string(), exp.to_string());
        }
        if let Some(iat) = self.iat {
            map.insert("iat".to_string(), iat.to_string());
        }

        map
    }

    /// Caller-supplied claims, excluding `email`, `id` and registered JWT claims.
    pub fn custom(&self) -> HashMap<String, String> {
        self.extra
            .iter()
            .filter(|(name, _)| !is_reserved(name))
            .map(|(name, value)| (name.clone(), value_to_string(value)))
            .collect()
    }
}

/// Whether `name` is a claim the codec manages itself.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_CLAIMS.contains(&name)
}

fn id_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        value => Some(value_to_string(&value)),
    })
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(42, "alice@example.com");

        assert_eq!(claims.id.as_deref(), Some("42"));
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.user_id(), Some(42));
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_user_id_not_numeric() {
        let mut claims = Claims::for_user(1, "alice@example.com");
        claims.id = Some("abc".to_string());

        assert_eq!(claims.user_id(), None);
    }

    #[test]
    fn test_to_map_contains_every_claim() {
        let claims = Claims::for_user(7, "bob@example.com")
            .with_issuer("issuer")
            .with_audience("audience")
            .with_expiration(2000)
            .with_issued_at(1000)
            .with_extra("role", "admin");

        let map = claims.to_map();
        assert_eq!(map.get("email").map(String::as_str), Some("bob@example.com"));
        assert_eq!(map.get("id").map(String::as_str), Some("7"));
        assert_eq!(map.get("iss").map(String::as_str), Some("issuer"));
        assert_eq!(map.get("aud").map(String::as_str), Some("audience"));
        assert_eq!(map.get("exp").map(String::as_str), Some("2000"));
        assert_eq!(map.get("iat").map(String::as_str), Some("1000"));
        assert_eq!(map.get("role").map(String::as_str), Some("admin"));
    }

    #[test]
    fn test_custom_skips_registered_claims() {
        let mut claims = Claims::for_user(7, "bob@example.com").with_extra("tenant", "acme");
        claims
            .extra
            .insert("nbf".to_string(), serde_json::json!(1234));

        let custom = claims.custom();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.get("tenant").map(String::as_str), Some("acme"));
    }

    #[test]
    fn test_missing_identity_claims_deserialize() {
        let claims: Claims = serde_json::from_value(serde_json::json!({ "exp": 10 })).unwrap();

        assert_eq!(claims.id, None);
        assert_eq!(claims.email, "");
        assert_eq!(claims.user_id(), None);
        assert!(!claims.to_map().contains_key("id"));
    }

    #[test]
    fn test_numeric_id_is_read_as_text() {
        let claims: Claims =
            serde_json::from_value(serde_json::json!({ "email": "a@x.com", "id": 5 })).unwrap();

        assert_eq!(claims.id.as_deref(), Some("5"));
        assert_eq!(claims.user_id(), Some(5));
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let claims = Claims::for_user(3, "carol@example.com").with_extra("plan", "pro");
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["email"], "carol@example.com");
        assert_eq!(value["id"], "3");
        assert_eq!(value["plan"], "pro");
        assert!(value.get("exp").is_none());
    }
}
