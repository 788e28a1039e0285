//! JWT access tokens
//!
//! The auth service issues HS256 tokens whose `sub` is the user's Snowflake.
//! This service only needs to validate them; [`JwtService::issue_access_token`]
//! exists for seeding and tests that share the secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use roster_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token type claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    /// Get the user ID as a Snowflake
    ///
    /// # Errors
    /// Returns `InvalidToken` if the subject is not a positive integer
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// Validates (and, for tests, issues) access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Sign an access token for `user_id`
    ///
    /// # Errors
    /// Returns an internal error if encoding fails
    pub fn issue_access_token(&self, user_id: Snowflake) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            token_type: TokenType::Access,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode and validate a token of any type
    ///
    /// # Errors
    /// `TokenExpired` for an expired signature, `InvalidToken` otherwise
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate an access token and return the caller's user ID
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, not an access token,
    /// or carries a malformed subject
    pub fn authenticate(&self, token: &str) -> Result<Snowflake, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::InvalidToken);
        }
        claims.user_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: &str, token_type: TokenType, exp_offset: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: sub.to_string(),
            iat: now,
            exp: now + exp_offset,
            token_type,
        }
    }

    #[test]
    fn test_issued_token_authenticates() {
        let service = JwtService::new(SECRET, 900);
        let token = service.issue_access_token(Snowflake::new(12345)).unwrap();

        assert_eq!(service.authenticate(&token).unwrap(), Snowflake::new(12345));
    }

    #[test]
    fn test_refresh_token_rejected() {
        let service = JwtService::new(SECRET, 900);
        let token = sign(&claims("12345", TokenType::Refresh, 600), SECRET);

        assert!(service.decode_token(&token).is_ok());
        assert!(matches!(service.authenticate(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new(SECRET, 900);
        let token = sign(&claims("12345", TokenType::Access, -3600), SECRET);

        assert!(matches!(service.authenticate(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_and_garbage() {
        let service = JwtService::new(SECRET, 900);
        let token = sign(&claims("12345", TokenType::Access, 600), "another-secret");

        assert!(matches!(service.authenticate(&token), Err(AppError::InvalidToken)));
        assert!(matches!(
            service.authenticate("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_subject() {
        let service = JwtService::new(SECRET, 900);
        let token = sign(&claims("alice", TokenType::Access, 600), SECRET);

        assert!(matches!(service.authenticate(&token), Err(AppError::InvalidToken)));
    }
}
