use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Idempotent DDL a module needs before it can serve requests.
///
/// Statements are applied on every startup, so they must be written with
/// `IF NOT EXISTS` guards. There is no version tracking.
#[derive(Debug, Clone)]
pub struct SchemaStatement {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Core module trait that all service modules implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module; also the path its routes are mounted under
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup before the schema is applied
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes will be mounted under `/{module_name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return schema statements contributed by this module
    /// Statements are executed in the order returned
    fn schema(&self) -> Vec<SchemaStatement> {
        vec![]
    }

    /// Called after the schema is in place, right before the server starts
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during application shutdown, after the server has stopped
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
