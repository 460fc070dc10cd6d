use futures::future::BoxFuture;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};

use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Migrations embedded from `migrations/` at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Runs `work` inside a database transaction.
///
/// Commits when `work` returns `Ok`. On `Err` the transaction is rolled
/// back and the original error is returned; if the rollback itself fails,
/// the returned error carries both the rollback failure and the original
/// error text.
pub async fn within_transaction<T, F>(pool: &PgPool, work: F) -> Result<T, AppError>
where
    T: Send,
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, AppError>> + Send,
{
    let mut tx = pool
        .begin()
        .await
        .map_err(|err| AppError::internal("failed to begin transaction", err))?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|err| AppError::internal("failed to commit transaction", err))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                return Err(AppError::internal_message(format!(
                    "failed to rollback transaction: {rollback_err} (original error: {err})"
                )));
            }
            Err(err)
        }
    }
}
