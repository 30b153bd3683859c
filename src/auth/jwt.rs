//! JWT token generation and validation
//!
//! HS256 tokens carrying the user's identity. The validator is cheap to
//! construct, so route handlers build one per request from config.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::schemas::{UserDoc, UserRole};
use crate::types::{PathwayError, Result};

/// JWT claims for an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User document id (hex)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Account role
    pub role: UserRole,
    /// Expiry (unix seconds)
    pub exp: u64,
    /// Issued at (unix seconds)
    pub iat: u64,
}

/// Issues and verifies HS256 tokens
#[derive(Clone)]
pub struct JwtValidator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_seconds: u64,
}

impl JwtValidator {
    /// Create a validator from a shared secret
    pub fn new(secret: &str, expiry_seconds: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_seconds,
        }
    }

    /// Generate a token for a user
    pub fn generate_token(&self, user: &UserDoc) -> Result<String> {
        let now = unix_now();
        let claims = Claims {
            sub: user.id_hex(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: now + self.expiry_seconds,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| PathwayError::Auth(format!("Failed to generate token: {}", e)))
    }

    /// Verify a token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| PathwayError::Auth(format!("Invalid token: {}", e)))
    }
}

/// Extract the bearer token from an Authorization header value
pub fn extract_token_from_header(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    fn test_user() -> UserDoc {
        let mut user = UserDoc::new(
            "Test User".into(),
            "test@example.com".into(),
            "hash".into(),
            UserRole::Student,
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn token_roundtrip() {
        let jwt = JwtValidator::new("test-secret", 3600);
        let user = test_user();

        let token = jwt.generate_token(&user).unwrap();
        let claims = jwt.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_hex());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::Student);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_rejected() {
        let jwt = JwtValidator::new("secret-a", 3600);
        let other = JwtValidator::new("secret-b", 3600);

        let token = jwt.generate_token(&test_user()).unwrap();
        assert!(other.verify_token(&token).is_err());
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_token_from_header("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_token_from_header("bearer abc123"), Some("abc123"));
        assert_eq!(extract_token_from_header("Basic abc123"), None);
        assert_eq!(extract_token_from_header("Bearer "), None);
    }
}
