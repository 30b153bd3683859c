//! User document schema
//!
//! Stores account identity and credentials. The password hash never
//! leaves the database layer; HTTP responses use a separate DTO.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for users
pub const USER_COLLECTION: &str = "users";

/// Account role
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "student"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// User document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UserDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// Display name
    pub name: String,

    /// Email address (unique, lookup and cross-environment join key)
    pub email: String,

    /// Argon2 password hash (PHC string)
    pub password_hash: String,

    /// Account role
    #[serde(default)]
    pub role: UserRole,
}

impl UserDoc {
    /// Create a new user document
    pub fn new(name: String, email: String, password_hash: String, role: UserRole) -> Self {
        Self {
            id: None,
            metadata: Metadata::new(),
            name,
            email,
            password_hash,
            role,
        }
    }

    /// Document id as a hex string, empty when unassigned
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

impl IntoIndexes for UserDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "email": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for UserDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Student).unwrap(),
            r#""student""#
        );
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), r#""admin""#);
    }

    #[test]
    fn password_hash_stays_in_document() {
        let user = UserDoc::new(
            "Test User".into(),
            "test@example.com".into(),
            "$argon2id$stub".into(),
            UserRole::Student,
        );

        // BSON round-trip must preserve the hash for storage
        let bson = bson::to_document(&user).unwrap();
        assert_eq!(bson.get_str("password_hash").unwrap(), "$argon2id$stub");
    }
}
