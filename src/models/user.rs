//! User model for storage and API.

use std::collections::HashMap;

use crate::db::fields;

/// Registered user record.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Allocated identifier (also part of the record's key)
    pub user_id: u64,
    /// Unique username
    pub username: String,
    /// Credential hash, opaque to the storage layer
    pub password_hash: String,
    /// When the user registered (RFC 3339)
    pub registered_at: String,
}

impl User {
    /// Encode into the stored field set.
    pub fn to_fields(&self) -> HashMap<String, String> {
        HashMap::from([
            ("user_id".to_string(), self.user_id.to_string()),
            ("username".to_string(), self.username.clone()),
            ("password_hash".to_string(), self.password_hash.clone()),
            ("registered_at".to_string(), self.registered_at.clone()),
        ])
    }

    /// Decode from a stored field set, defaulting malformed values.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            user_id: fields::u64_field(fields, "user_id"),
            username: fields::text_field(fields, "username"),
            password_hash: fields::text_field(fields, "password_hash"),
            registered_at: fields::text_field(fields, "registered_at"),
        }
    }
}
