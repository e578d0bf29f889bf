//! JWT issuance and verification for API access tokens

use chrono::{Duration, Utc};
use core_config::jwt::JwtConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{UserError, UserResult};
use crate::models::User;

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (unix timestamp)
    pub exp: i64,
    /// Issued at (unix timestamp)
    pub iat: i64,
}

/// Issue an HS256 access token for the given user.
pub fn issue_token(user: &User, config: &JwtConfig) -> UserResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.to_string(),
        exp: (now + Duration::seconds(config.expires_in_secs as i64)).timestamp(),
        iat: now.timestamp(),
    };

    let header = Header {
        alg: Algorithm::HS256,
        ..Default::default()
    };

    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| UserError::Token(e.to_string()))
}

/// Verify a token's signature and expiry and return its claims.
pub fn verify_token(token: &str, config: &JwtConfig) -> UserResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| UserError::Token(e.to_string()))?;

    Ok(token_data.claims)
}
