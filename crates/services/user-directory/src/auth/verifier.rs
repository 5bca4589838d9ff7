//! Token verification capability.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use common::{AppResult, JwtConfig};
use domain::Claims;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Verifies a raw token and yields its claims.
///
/// Implementations reject bad signatures, expired and malformed tokens with
/// `AppError::Unauthenticated`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HMAC-signed JWT verifier (HS256, HS384 or HS512).
///
/// `exp` is optional; when present it must not have passed.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.leeway = config.leeway_seconds;

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(token_data.claims)
    }
}
