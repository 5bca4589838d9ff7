//! Store connection pool and schema management.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use common::DatabaseConfig;

use super::migrations::Migrator;
use crate::cli::MigrateAction;

/// Pooled handle on the `users` store.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

/// One migration as reported by `migrate status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        db.migrate(MigrateAction::Up).await?;
        tracing::info!(max_connections = config.max_connections, "Store ready");

        Ok(db)
    }

    /// Open the pool without touching the schema.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        Ok(Self {
            connection: SeaDatabase::connect(options).await?,
        })
    }

    /// Pool handle for repositories; clones share the pool.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run one schema step. `Status` changes nothing.
    pub async fn migrate(&self, action: MigrateAction) -> Result<(), DbErr> {
        match action {
            MigrateAction::Up => Migrator::up(&self.connection, None).await,
            MigrateAction::Down => Migrator::down(&self.connection, Some(1)).await,
            MigrateAction::Fresh => Migrator::fresh(&self.connection).await,
            MigrateAction::Status => Ok(()),
        }
    }

    /// Every known migration with whether it has been applied, oldest first.
    pub async fn migration_states(&self) -> Result<Vec<MigrationState>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.connection).await?;

        Ok(migrations
            .iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: matches!(m.status(), sea_orm_migration::MigrationStatus::Applied),
            })
            .collect())
    }
}
