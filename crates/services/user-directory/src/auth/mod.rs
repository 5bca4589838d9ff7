//! Caller authentication: bearer token extraction and verification.

mod resolver;
mod verifier;

pub use resolver::{bearer_token, AuthResolver};
pub use verifier::{JwtVerifier, TokenVerifier};

#[cfg(any(test, feature = "test-utils"))]
pub use verifier::MockTokenVerifier;
