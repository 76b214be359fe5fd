//! Bookstore application library
//!
//! Wires the service modules to the database pool, the HTTP server and the
//! module lifecycle.

pub mod modules;

use std::time::Duration;

use anyhow::Context;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Run the service until a shutdown signal arrives.
///
/// The pool is opened here and closed only after the HTTP server has stopped,
/// bounded by the configured grace period.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db_host = %settings.database.host,
        db_port = settings.database.port,
        db_name = %settings.database.name,
        "bookstore bootstrap starting"
    );

    let pool = bookstore_db::connect(&settings.database)
        .await
        .context("failed to connect to the database")?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, pool.clone());

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_all(&ctx).await?;
    bookstore_db::apply_schema(&pool, &registry.collect_schema())
        .await
        .context("failed to apply schema")?;
    registry.start_all(&ctx).await?;

    tracing::info!("bookstore bootstrap complete");

    let served = bookstore_http::start_server(&registry, &settings).await;

    let stopped = registry.stop_all().await;
    bookstore_db::close(pool, Duration::from_millis(settings.server.shutdown_grace_ms)).await;

    served?;
    stopped
}
