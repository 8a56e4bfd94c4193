use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

/// Connections older than this are recycled by the pool.
const POOL_RECYCLE_SECS: u64 = 300;
const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

fn engine_name(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false).test_before_acquire(true);

    match kind {
        // One pooled connection keeps every query on the same in-memory database
        DbKind::SqliteMemory => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::SqliteFile => {
            opts.max_connections(1)
                .max_lifetime(Duration::from_secs(POOL_RECYCLE_SECS));
        }
        DbKind::Postgres => {
            opts.max_lifetime(Duration::from_secs(POOL_RECYCLE_SECS));
        }
    }
    opts
}

/// Retry a connection attempt with fixed interval delays
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sea_orm::DbErr>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt < max_attempts {
                    warn!(
                        attempt,
                        max_attempts, interval_ms, "connection_retry=failed"
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .map(AppError::from)
        .unwrap_or_else(|| AppError::config("connection retry failed without an error")))
}

/// Open a pooled connection. Does NOT run migrations.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;
    let opts = connect_options(kind, url);

    info!(engine = engine_name(kind), "connecting to database");
    retry_connection(
        || Database::connect(opts.clone()),
        CONNECT_ATTEMPTS,
        CONNECT_RETRY_INTERVAL_MS,
    )
    .await
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(engine = engine_name(kind), "database ready");
    Ok(conn)
}
