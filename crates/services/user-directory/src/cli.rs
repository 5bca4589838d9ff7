//! Command-line surface of the `user-directory` binary.

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "user-directory")]
#[command(version, about = "Authenticated user directory service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the gRPC server
    Serve(ServeArgs),

    /// Manage the `users` schema
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

/// Where the gRPC server binds.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    #[arg(long, env = "USER_DIRECTORY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "USER_DIRECTORY_PORT", default_value_t = 50052)]
    pub port: u16,
}

/// Schema migration step.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Revert the most recent migration
    Down,
    /// Report applied and pending migrations
    Status,
    /// Drop everything and re-apply all migrations
    Fresh,
}
