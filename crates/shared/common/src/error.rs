//! Unified error handling for the user directory.
//!
//! Every failed operation produces exactly one `AppError`, which converts to
//! a Tonic gRPC status carrying the stable error code in its metadata.

use domain::{AuthFailure, DomainError, ErrorCode, ValidationError};
use thiserror::Error;
use tonic::metadata::{MetadataMap, MetadataValue};
use tonic::Status;

/// Metadata key carrying the stable error code
pub const ERROR_CODE_METADATA_KEY: &str = "x-error-code";

/// Metadata key carrying every failing field as JSON
pub const VALIDATION_ERRORS_METADATA_KEY: &str = "x-validation-errors";

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("{0}")]
    Unauthenticated(AuthFailure),

    // Input
    #[error("{}", validation_summary(.0))]
    Validation(Vec<ValidationError>),

    #[error("No fields provided for update")]
    NoFieldsProvided,

    #[error("Invalid user id")]
    InvalidId,

    // Resource errors
    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

fn validation_summary(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Validation failed".to_string())
}

impl AppError {
    /// Get the stable error code for the client
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            AppError::Validation(errors) => errors
                .first()
                .map(|e| e.code)
                .unwrap_or(ErrorCode::InternalError),
            AppError::NoFieldsProvided => ErrorCode::NoFieldsProvided,
            AppError::InvalidId => ErrorCode::InvalidId,
            AppError::NotFound => ErrorCode::UserNotFound,
            AppError::Conflict(_) => ErrorCode::UserExists,
            #[cfg(feature = "database")]
            AppError::Database(_) => ErrorCode::InternalError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get error code string for client
    pub fn code(&self) -> &'static str {
        self.error_code().as_str()
    }

    /// Get gRPC status code
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            AppError::Unauthenticated(_) => tonic::Code::Unauthenticated,
            AppError::Validation(_) | AppError::NoFieldsProvided | AppError::InvalidId => {
                tonic::Code::InvalidArgument
            }
            AppError::NotFound => tonic::Code::NotFound,
            AppError::Conflict(_) => tonic::Code::AlreadyExists,
            _ => tonic::Code::Internal,
        }
    }

    /// Field-level failures, empty for every other error kind
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        let mut metadata = MetadataMap::new();
        metadata.insert(ERROR_CODE_METADATA_KEY, MetadataValue::from_static(err.code()));

        if !err.validation_errors().is_empty() {
            match serde_json::to_string(err.validation_errors()) {
                Ok(json) => match json.parse() {
                    Ok(value) => {
                        metadata.insert(VALIDATION_ERRORS_METADATA_KEY, value);
                    }
                    Err(_) => tracing::warn!("Validation details are not valid metadata"),
                },
                Err(e) => tracing::warn!("Failed to encode validation details: {}", e),
            }
        }

        Status::with_metadata(err.grpc_code(), err.user_message(), metadata)
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::NoFieldsProvided => AppError::NoFieldsProvided,
            DomainError::InvalidId(_) => AppError::InvalidId,
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        AppError::Unauthenticated(failure)
    }
}

// =============================================================================
// Token Verification Errors
// =============================================================================

#[cfg(feature = "jwt")]
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::warn!("Token rejected: {:?}", err.kind());
        AppError::Unauthenticated(AuthFailure::InvalidToken)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(reason: impl Into<String>) -> Self {
        AppError::Conflict(reason.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
