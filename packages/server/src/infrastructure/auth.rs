//! HS256 JWT implementation of the token verifier.
//!
//! Claims are `{"userId": ..., "role": "teacher" | "student", "exp": ...}`.
//! A verified signature is not enough: the payload must also form a valid
//! `Identity`, otherwise the token is rejected.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{AuthError, Identity, Role, TokenVerifier, UserId};

/// Lifetime of issued tokens
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Wire claims. Fields are optional so that a missing field is reported as
/// invalid claims rather than a generic decode error.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    exp: u64,
}

impl Claims {
    fn into_identity(self) -> Result<Identity, AuthError> {
        let user_id = self
            .user_id
            .ok_or_else(|| AuthError::InvalidClaims("missing userId".to_string()))?;
        let user_id =
            UserId::new(user_id).map_err(|e| AuthError::InvalidClaims(e.to_string()))?;
        let role = self
            .role
            .ok_or_else(|| AuthError::InvalidClaims("missing role".to_string()))?;
        let role =
            Role::try_from(role.as_str()).map_err(|e| AuthError::InvalidClaims(e.to_string()))?;
        Ok(Identity::new(user_id, role))
    }
}

pub struct JwtTokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `identity` valid for `ttl`.
    pub fn issue(&self, identity: &Identity, ttl: Duration) -> Result<String, AuthError> {
        let exp = (chrono::Utc::now().timestamp().max(0) as u64)
            .checked_add(ttl.as_secs())
            .ok_or_else(|| {
                AuthError::Issue(format!("ttl of {}s is out of range", ttl.as_secs()))
            })?;
        let claims = Claims {
            user_id: Some(identity.user_id.as_str().to_string()),
            role: Some(identity.role.as_str().to_string()),
            exp,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Issue(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Identity, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        data.claims.into_identity()
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.decode(token)
    }
}

/// Extract a bearer credential from an `Authorization` header value.
///
/// Accepts `Bearer <token>` or a raw token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim();
    (!token.is_empty()).then_some(token)
}
