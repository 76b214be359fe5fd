use std::time::Duration;

use bookstore_kernel::settings::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::error::DbError;

/// Translate database settings into driver connection options.
pub fn connect_options(settings: &DatabaseSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.name)
}

/// Open the connection pool and verify the server answers.
///
/// The pool is the single long-lived persistence handle of the process; the
/// caller owns it and must hand it to [`close`] on shutdown.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_millis(settings.connect_timeout_ms))
        .connect_with(connect_options(settings))
        .await
        .map_err(|source| DbError::Connection {
            host: settings.host.clone(),
            port: settings.port,
            source,
        })?;

    ping(&pool).await?;

    tracing::info!(
        target: "bookstore-db",
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        "database connection established"
    );

    Ok(pool)
}

/// Run a trivial query to prove the pool can reach the server.
pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(DbError::Ping)?;
    Ok(())
}

/// Close every pooled connection, waiting at most `grace` for checked-out
/// ones to be returned.
pub async fn close(pool: PgPool, grace: Duration) {
    match tokio::time::timeout(grace, pool.close()).await {
        Ok(()) => tracing::info!(target: "bookstore-db", "database connections closed"),
        Err(_) => tracing::warn!(
            target: "bookstore-db",
            grace_ms = grace.as_millis() as u64,
            "connections still in use after grace period; closing anyway"
        ),
    }
}
