use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use crate::error::AppError;

/// Boxed future borrowed from the transaction it runs in.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, AppError>> + Send + 'c>>;

/// Attempts made by [`with_txn_retry`] before giving up on lock conflicts.
pub const MAX_TXN_ATTEMPTS: u32 = 3;

/// Pause before the next attempt; grows linearly with the attempt number.
const RETRY_BACKOFF_MS: u64 = 15;

/// Run `f` inside a fresh transaction: commit on `Ok`, roll back on `Err`.
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let txn = db.begin().await?;
    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; the original error wins
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}

/// [`with_txn`] that reruns the whole closure when it fails with an
/// optimistic-lock conflict.
pub async fn with_txn_retry<R, F>(db: &DatabaseConnection, mut f: F) -> Result<R, AppError>
where
    F: for<'c> FnMut(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let mut attempt = 1;
    loop {
        match with_txn(db, &mut f).await {
            Err(err) if err.is_optimistic_lock() && attempt < MAX_TXN_ATTEMPTS => {
                debug!(attempt, "Optimistic lock conflict, retrying transaction");
                tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * u64::from(attempt))).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}
