//! Infrastructure layer - database connection, scoped sessions and migrations.

mod db;
pub mod migrations;
mod session;

pub use db::{Database, MigrationState};
pub use migrations::Migrator;
pub use session::Session;
