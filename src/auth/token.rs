use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of a token, in minutes, when the caller does not ask for one.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

/// Represents the claims encoded within a session JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id.
    pub sub: i64,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiration, seconds since epoch.
    pub exp: i64,
}

/// Issues and validates signed session tokens.
///
/// Built once at startup from the configured secret and shared with handlers
/// through `web::Data`.
#[derive(Clone)]
pub struct Credentials {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Credentials {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; a token is dead the second `exp` passes.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Generates a token for `user_id` that expires after `ttl`
    /// (`DEFAULT_TOKEN_TTL_MINUTES` when `None`).
    pub fn issue_token(&self, user_id: i64, ttl: Option<Duration>) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES));
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Returns the user id carried by `token`, or `None` if the signature is
    /// wrong, the payload is malformed, or the token has expired.
    pub fn validate_token(&self, token: &str) -> Option<i64> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                log::debug!("rejected session token: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    #[test]
    fn test_token_generation_and_verification() {
        let credentials = Credentials::new("test_secret_for_gen_verify");
        let token = credentials.issue_token(1, None).unwrap();
        assert_eq!(credentials.validate_token(&token), Some(1));
    }

    #[test]
    fn test_default_ttl_is_fifteen_minutes() {
        let credentials = Credentials::new("test_secret_for_ttl");
        let token = credentials.issue_token(3, None).unwrap();

        let data = decode::<Claims>(&token, &credentials.decoding_key, &credentials.validation)
            .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 15 * 60);
    }

    #[test]
    fn test_token_expiration() {
        let credentials = Credentials::new("test_secret_for_expiration");
        let expired = credentials
            .issue_token(2, Some(Duration::minutes(-5)))
            .unwrap();

        assert_eq!(credentials.validate_token(&expired), None);
    }

    #[test]
    fn test_invalid_token_signature() {
        let issuer = Credentials::new("one_secret");
        let verifier = Credentials::new("a_completely_different_secret");
        let token = issuer.issue_token(5, None).unwrap();

        assert_eq!(verifier.validate_token(&token), None);
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let credentials = Credentials::new("test_secret");
        assert_eq!(credentials.validate_token(""), None);
        assert_eq!(credentials.validate_token("not-a-jwt"), None);
        assert_eq!(credentials.validate_token("a.b.c"), None);
    }

    #[test]
    fn test_any_single_bit_flip_in_payload_is_rejected() {
        let credentials = Credentials::new("test_secret_for_tamper");
        let token = credentials.issue_token(42, None).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();

        for byte in 0..payload.len() {
            for bit in 0..8 {
                let mut tampered = payload.clone();
                tampered[byte] ^= 1 << bit;
                let forged = format!(
                    "{}.{}.{}",
                    parts[0],
                    URL_SAFE_NO_PAD.encode(&tampered),
                    parts[2]
                );
                assert_eq!(
                    credentials.validate_token(&forged),
                    None,
                    "flipping bit {} of byte {} was accepted",
                    bit,
                    byte
                );
            }
        }
    }
}
