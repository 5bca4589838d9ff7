//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Moderator role
pub const ROLE_MODERATOR: &str = "moderator";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_MODERATOR];

// =============================================================================
// User Status
// =============================================================================

pub const STATUS_CREATED: &str = "created";
pub const STATUS_UPDATED: &str = "updated";
pub const STATUS_DELETED: &str = "deleted";

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: usize = 3;

/// Minimum address length requirement
pub const MIN_ADDRESS_LENGTH: usize = 10;

/// Youngest age accepted
pub const MIN_AGE: i64 = 18;

/// Oldest age accepted
pub const MAX_AGE: i64 = 150;

/// Reported when an email is already taken
pub const USER_EXISTS_MESSAGE: &str = "User with this email already exists";

/// Exact referral code length
pub const REFERRAL_CODE_LENGTH: usize = 8;

/// `local@domain.tld`, ASCII word characters, dots and hyphens.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*@([A-Za-z0-9_-]+\.)+[A-Za-z]{2,7}$";

/// `+<1-3 digit country code><7-10 digits>`
pub const PHONE_PATTERN: &str = r"^\+[0-9]{1,3}[0-9]{7,10}$";

// =============================================================================
// Authentication
// =============================================================================

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Claim carrying the caller id
pub const USER_ID_CLAIM: &str = "userId";

/// Standard subject claim, used when `userId` is absent
pub const SUBJECT_CLAIM: &str = "sub";
