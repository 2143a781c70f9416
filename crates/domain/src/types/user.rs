//! User profile types
//!
//! The backend owns the profile schema; the client treats it as an opaque
//! JSON object that the UI reads fields from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque user profile record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a profile from a JSON value; only objects qualify.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Extract the profile from a profile endpoint payload.
    ///
    /// Accepts both `{"user": {...}}` and a bare profile object. A `user`
    /// key holding anything but an object is rejected.
    #[must_use]
    pub fn from_profile_payload(value: Value) -> Option<Self> {
        match value {
            Value::Object(mut map) => match map.remove("user") {
                Some(Value::Object(user)) => Some(Self(user)),
                Some(_) => None,
                None => Some(Self(map)),
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.0.get("id")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    /// Overwrite the given fields, keeping every other field as is.
    pub fn merge(&mut self, partial: Map<String, Value>) {
        self.0.extend(partial);
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for UserProfile {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn merge_overwrites_only_given_fields() {
        let mut user = UserProfile::new(object(json!({"id": 1, "name": "Ada", "plan": "pro"})));
        user.merge(object(json!({"name": "Ada L.", "avatar": "a.png"})));

        assert_eq!(user.get("name"), Some(&json!("Ada L.")));
        assert_eq!(user.get("plan"), Some(&json!("pro")));
        assert_eq!(user.get("avatar"), Some(&json!("a.png")));
        assert_eq!(user.id(), Some(&json!(1)));
    }

    #[test]
    fn profile_payload_unwraps_user_key() {
        let user = UserProfile::from_profile_payload(json!({"user": {"id": 1}})).unwrap();
        assert_eq!(user.id(), Some(&json!(1)));

        let bare = UserProfile::from_profile_payload(json!({"id": 2, "email": "a@b.c"})).unwrap();
        assert_eq!(bare.email(), Some("a@b.c"));

        assert!(UserProfile::from_profile_payload(json!("nope")).is_none());
    }

    #[test]
    fn profile_payload_with_non_object_user_is_rejected() {
        assert!(UserProfile::from_profile_payload(json!({"user": null})).is_none());
        assert!(UserProfile::from_profile_payload(json!({"user": "x", "id": 1})).is_none());
    }

    #[test]
    fn serializes_transparently() {
        let user = UserProfile::new(object(json!({"id": 7})));
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({"id": 7}));
    }
}
