//! Transaction boundary helpers
//!
//! A service opens one transaction per operation with [`begin`], runs its
//! whole unit of work against `&mut *tx`, then hands the outcome to
//! [`commit_or_rollback`]. A transaction dropped before that point (panic or
//! cancelled future) is rolled back by sqlx.

use sqlx::{PgPool, Postgres, Transaction};
use storial_core::{DomainError, RepoResult};
use tracing::{debug, error};

use crate::repositories::map_db_error;

/// Transaction type handed to repositories
pub type PgTransaction = Transaction<'static, Postgres>;

/// Open a new transaction
pub async fn begin(pool: &PgPool) -> RepoResult<PgTransaction> {
    pool.begin().await.map_err(map_db_error)
}

/// Finish a transaction according to the unit of work's result
///
/// `Ok` commits; a failed commit becomes the error. `Err` rolls back and
/// returns the original error, unless the rollback itself fails, in which
/// case the rollback error is returned instead.
pub async fn commit_or_rollback<T, E>(tx: PgTransaction, result: Result<T, E>) -> Result<T, E>
where
    E: From<DomainError> + std::fmt::Display,
{
    match result {
        Ok(value) => {
            tx.commit().await.map_err(|e| E::from(map_db_error(e)))?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => match tx.rollback().await {
            Ok(()) => {
                debug!(error = %err, "Transaction rolled back");
                Err(err)
            }
            Err(rollback_err) => {
                error!(
                    error = %err,
                    rollback_error = %rollback_err,
                    "Transaction rollback failed"
                );
                Err(E::from(map_db_error(rollback_err)))
            }
        },
    }
}
