//! User Directory Library
//!
//! Authenticated CRUD over user records, served via gRPC.
//! The pipeline runs auth resolution, field validation, conflict and
//! existence checks, then persistence, short-circuiting at the first failure.

pub mod auth;
pub mod cli;
pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::auth::{AuthResolver, JwtVerifier};
use crate::cli::MigrateAction;
use crate::config::UserDirectoryConfig;
use crate::grpc::UserGrpcService;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserManager;

/// Serve the `UserDirectory` gRPC API until the process is stopped.
///
/// Configuration comes from the environment; the schema is migrated on
/// startup.
pub async fn run(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let config = UserDirectoryConfig::from_env()?;
    let db = Database::connect(&config.database).await?;

    let users = Arc::new(UserManager::new(Arc::new(UserStore::new(db.get_connection()))));
    let auth = AuthResolver::new(Arc::new(JwtVerifier::new(&config.jwt)));
    let api = UserGrpcService::new(users, auth);

    info!(%addr, "User directory listening");
    Server::builder()
        .add_service(proto::UserDirectoryServer::new(api))
        .serve(addr)
        .await?;

    Ok(())
}

/// Apply one migration step against the configured store.
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserDirectoryConfig::from_env()?;
    let db = Database::open(&config.database).await?;

    db.migrate(action).await?;

    let states = db.migration_states().await?;
    let pending = states.iter().filter(|m| !m.applied).count();
    for state in &states {
        info!(migration = %state.name, applied = state.applied);
    }
    info!(?action, total = states.len(), pending, "Migration step finished");

    Ok(())
}
