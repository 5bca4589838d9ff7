//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated definitions for the `UserDirectory`
//! service: create, get, update and delete of user records.

/// User directory definitions.
pub mod user {
    tonic::include_proto!("user");
}

// Re-export commonly used items
pub use user::user_directory_client::UserDirectoryClient;
pub use user::user_directory_server::{UserDirectory, UserDirectoryServer};
