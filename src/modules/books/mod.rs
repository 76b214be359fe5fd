pub mod models;
pub mod routes;
pub mod store;

#[cfg(test)]
mod memory;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookstore_kernel::{InitCtx, Module, SchemaStatement};

use routes::SharedStore;

/// The `books` table. CHECK constraints repeat the payload validation rules
/// so rows written by other clients obey them too.
const BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id     SERIAL PRIMARY KEY,
    name   VARCHAR(100) NOT NULL UNIQUE CHECK (name <> ''),
    price  NUMERIC NOT NULL CHECK (price >= 0),
    genre  INTEGER NOT NULL CHECK (genre BETWEEN 1 AND 3),
    amount INTEGER NOT NULL CHECK (amount >= 0)
);
"#;

/// Books module: CRUD over the `books` table, mounted at `/books`
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(routes::list_books).post(routes::create_book))
            .route(
                "/{id}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .with_state(self.store.clone())
    }

    fn schema(&self) -> Vec<SchemaStatement> {
        vec![SchemaStatement {
            id: "001_books_table",
            sql: BOOKS_TABLE,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: SharedStore) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(store))
}
