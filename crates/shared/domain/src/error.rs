//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (gRPC, database).

use serde::Serialize;
use thiserror::Error;

/// Stable machine-readable error codes surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidName,
    InvalidEmail,
    InvalidAge,
    InvalidPhone,
    InvalidAddress,
    InvalidRole,
    InvalidReferralCode,
    NoFieldsProvided,
    InvalidId,
    UserNotFound,
    UserExists,
    Unauthenticated,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidName => "INVALID_NAME",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidAge => "INVALID_AGE",
            ErrorCode::InvalidPhone => "INVALID_PHONE",
            ErrorCode::InvalidAddress => "INVALID_ADDRESS",
            ErrorCode::InvalidRole => "INVALID_ROLE",
            ErrorCode::InvalidReferralCode => "INVALID_REFERRAL_CODE",
            ErrorCode::NoFieldsProvided => "NO_FIELDS_PROVIDED",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::UserExists => "USER_EXISTS",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field failing its declared constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub code: ErrorCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

/// Why a caller could not be authenticated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization` header, or one without the `Bearer ` prefix
    #[error("No authorization token provided")]
    MissingToken,

    /// The verifier rejected the token (bad signature, expired, malformed)
    #[error("Invalid/Expired token")]
    InvalidToken,
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more fields failed validation
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// An update carried no updatable field
    #[error("No fields provided for update")]
    NoFieldsProvided,

    /// Identifier is not structurally valid
    #[error("Invalid user id: {0}")]
    InvalidId(String),
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
