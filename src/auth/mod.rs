use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::UserModel;
use crate::errors::ServiceError;
use crate::AppState;

/// JWT claims carried in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Whether the user has admin rights
    pub is_admin: bool,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Token ID
    pub jti: String,
}

/// Token issuing and verification.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: usize,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("expiration_secs", &self.expiration_secs)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, expiration_secs: usize) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_secs,
        }
    }

    /// Issues an HS256 access token for the given user.
    pub fn generate_token(&self, user: &UserModel) -> Result<String, ServiceError> {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            iat: now,
            exp: now + self.expiration_secs,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::InternalError(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Unauthorized("Invalid or expired token".to_string()))
    }
}

/// Hashes a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::InternalError(format!("Failed to hash password: {}", e)))
}

/// Verifies a password against a stored Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ServiceError::InternalError(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ServiceError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("Admin access required".to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ServiceError::Unauthorized("Missing Authorization header".to_string())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            ServiceError::Unauthorized("Authorization header must use Bearer scheme".to_string())
        })?;

        let claims = state.auth.validate_token(token)?;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthorized("Malformed token subject".to_string()))?;

        Ok(AuthUser {
            id,
            email: claims.email,
            is_admin: claims.is_admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> UserModel {
        UserModel {
            id: Uuid::new_v4(),
            email: "admin@example.com".into(),
            password_hash: "irrelevant".into(),
            name: "Admin".into(),
            is_admin: true,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let auth = AuthService::new("test_secret_key_for_testing_purposes_only", 3600);
        let user = sample_user();
        let token = auth.generate_token(&user).unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert!(claims.is_admin);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let auth = AuthService::new("test_secret_key_for_testing_purposes_only", 3600);
        let other = AuthService::new("another_secret_key_that_does_not_match_it", 3600);
        let token = other.generate_token(&sample_user()).unwrap();
        assert!(auth.validate_token(&token).is_err());
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("s3cret-passw0rd").unwrap();
        assert!(verify_password("s3cret-passw0rd", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn non_admin_cannot_pass_admin_check() {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            is_admin: false,
        };
        assert!(user.require_admin().is_err());
    }
}
