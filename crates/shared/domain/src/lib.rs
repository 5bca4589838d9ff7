//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity, the authenticated principal and the field constraint table.

pub mod constants;
pub mod error;
pub mod principal;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{AuthFailure, DomainError, DomainResult, ErrorCode, ValidationError};
pub use principal::{Claims, Principal};
pub use user::{
    DeletedUser, NewUser, User, UserDraft, UserId, UserPatch, UserRole, UserStatus,
};
pub use validation::{validate_field, Field, FieldValue};
