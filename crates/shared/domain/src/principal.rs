//! Authenticated caller identity.

use serde_json::{Map, Value};

use crate::constants::{SUBJECT_CLAIM, USER_ID_CLAIM};

/// Raw claims produced by a token verifier.
pub type Claims = Map<String, Value>;

/// Identity of the caller for the duration of one request. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    subject: String,
    claims: Claims,
}

impl Principal {
    pub fn new(subject: impl Into<String>, claims: Claims) -> Self {
        Self {
            subject: subject.into(),
            claims,
        }
    }

    /// Build a principal from verified claims.
    ///
    /// The subject is `userId`, falling back to `sub`. Returns `None` when
    /// neither claim holds a non-empty string or number.
    pub fn from_claims(claims: Claims) -> Option<Self> {
        let subject = [USER_ID_CLAIM, SUBJECT_CLAIM]
            .iter()
            .find_map(|name| claims.get(*name).and_then(subject_from_value))?;

        Some(Self { subject, claims })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}

fn subject_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
