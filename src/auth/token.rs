//! Signed bearer-token issuance and resolution.
//!
//! Tokens are HS256 JWTs carrying the user's email (`sub`) and an absolute
//! expiry (`exp`). They are stateless: nothing is persisted, there is no
//! revocation list, and a token stays valid until its expiry regardless of
//! logout. The payload is signed but not encrypted.

use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated user's email.
    pub sub: String,
    /// Absolute expiry as a Unix timestamp.
    pub exp: i64,
}

/// Issue a signed token for `email` expiring `ttl_secs` from now.
pub fn issue(email: &str, secret: &str, ttl_secs: u64) -> Result<String, AppError> {
    let claims = Claims {
        sub: email.to_string(),
        exp: chrono::Utc::now().timestamp() + ttl_secs as i64,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
}

/// Verify a token's signature and expiry and recover the subject email.
///
/// Expiry is exclusive of the issue instant: a token whose `exp` equals the
/// current timestamp is already invalid, so `ttl_secs = 0` never yields a
/// usable token.
pub fn resolve(token: &str, secret: &str) -> Result<String, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    // Expiry is enforced below with an exclusive bound
    validation.validate_exp = false;
    validation.required_spec_claims = ["exp".to_string()].into_iter().collect();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized("Could not validate credentials".to_string()))?;

    if data.claims.exp <= chrono::Utc::now().timestamp() {
        return Err(AppError::Unauthorized(
            "Could not validate credentials".to_string(),
        ));
    }

    Ok(data.claims.sub)
}
