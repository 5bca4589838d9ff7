//! Auth context resolution.

use std::sync::Arc;

use common::AppResult;
use domain::{AuthFailure, Principal, BEARER_TOKEN_PREFIX};

use super::TokenVerifier;

/// Turns a raw `Authorization` header value into a [`Principal`].
///
/// A missing token is a hard failure; there is no anonymous principal.
#[derive(Clone)]
pub struct AuthResolver {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthResolver {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Resolve the caller from the header value, if any.
    pub fn resolve(&self, header: Option<&str>) -> AppResult<Principal> {
        let token = header
            .and_then(bearer_token)
            .ok_or(AuthFailure::MissingToken)?;

        let claims = self.verifier.verify(token)?;

        Principal::from_claims(claims).ok_or_else(|| {
            tracing::warn!("Token carries no subject claim");
            AuthFailure::InvalidToken.into()
        })
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix(BEARER_TOKEN_PREFIX)?;
    token.split_whitespace().next()
}
