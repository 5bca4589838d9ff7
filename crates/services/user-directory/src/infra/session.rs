//! Scoped store access.
//!
//! A `Session` holds one pooled connection inside a transaction for the
//! duration of a single repository call. Committing consumes it; any other
//! exit path (early `?` return, panic, cancelled future) drops it, which
//! rolls back and hands the connection back to the pool.

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use common::AppResult;

/// One repository call's hold on the store.
pub struct Session {
    txn: DatabaseTransaction,
}

impl Session {
    /// Acquire a connection and open a transaction on it.
    pub async fn begin(db: &DatabaseConnection) -> AppResult<Self> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// Connection to run statements on.
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commit and release the connection.
    pub async fn commit(self) -> AppResult<()> {
        self.txn.commit().await?;
        Ok(())
    }
}
