//! User directory configuration.

use std::env;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig};
use domain::MIN_JWT_SECRET_LENGTH;

/// User directory configuration.
#[derive(Debug, Clone, Default)]
pub struct UserDirectoryConfig {
    /// Store connection settings
    pub database: DatabaseConfig,
    /// Token verification settings
    pub jwt: JwtConfig,
}

impl UserDirectoryConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` is required; everything else has a default. Host and
    /// port are command-line flags.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let secret = env::var("JWT_SECRET")
            .or_else(|_| env::var("USER_DIRECTORY_JWT_SECRET"))
            .map_err(|_| AppError::internal("JWT_SECRET must be set"))?;
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            tracing::warn!(
                "JWT_SECRET is shorter than {} characters",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Ok(Self {
            database: DatabaseConfig {
                url: env::var("USER_DIRECTORY_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            jwt: JwtConfig {
                secret,
                leeway_seconds: parse_var("JWT_LEEWAY_SECONDS")
                    .unwrap_or(defaults.jwt.leeway_seconds),
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
