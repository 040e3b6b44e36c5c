/// Bearer-token verification
///
/// Tokens are minted by the identity service. This side only verifies them:
/// RS256 against its public key in production, or HS256 with a shared secret
/// for local runs and tests.
use anyhow::{anyhow, Result as AnyResult};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::models::UserId;

/// Claims this service reads. Extra claims are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

pub struct JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn hs256(secret: &[u8]) -> Self {
        Self::with_key(DecodingKey::from_secret(secret), Algorithm::HS256)
    }

    pub fn rs256_pem(public_key_pem: &str) -> AnyResult<Self> {
        let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;
        Ok(Self::with_key(key, Algorithm::RS256))
    }

    pub fn from_config(config: &AuthConfig) -> AnyResult<Self> {
        match (&config.jwt_public_key_pem, &config.jwt_secret) {
            (Some(pem), _) => Self::rs256_pem(pem),
            (None, Some(secret)) => Ok(Self::hs256(secret.as_bytes())),
            (None, None) => Err(anyhow!("no JWT verification key configured")),
        }
    }

    fn with_key(key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        Self { key, validation }
    }

    /// Verify signature and expiry and return the acting user.
    pub fn validate(&self, token: &str) -> Result<UserId, AppError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        UserId::parse(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &[u8] = b"test-secret";

    fn token(sub: &str, exp_offset: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: Utc::now().timestamp() + exp_offset,
            iat: Some(Utc::now().timestamp()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_subject() {
        let user = UserId::new();
        let validator = JwtValidator::hs256(SECRET);
        assert_eq!(validator.validate(&token(&user.to_string(), 600)).unwrap(), user);
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let validator = JwtValidator::hs256(SECRET);
        let err = validator
            .validate(&token(&UserId::new().to_string(), -3600))
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let validator = JwtValidator::hs256(b"other-secret");
        assert!(validator
            .validate(&token(&UserId::new().to_string(), 600))
            .is_err());
    }

    #[test]
    fn non_uuid_subject_is_unauthorized() {
        let validator = JwtValidator::hs256(SECRET);
        let err = validator.validate(&token("alice", 600)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid token subject");
    }
}
