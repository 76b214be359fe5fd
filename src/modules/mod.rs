pub mod books;

use std::sync::Arc;

use bookstore_kernel::ModuleRegistry;
use sqlx::PgPool;

/// Register every service module, backed by the shared pool
pub fn register_all(registry: &mut ModuleRegistry, pool: PgPool) {
    let store = Arc::new(books::store::PgBookStore::new(pool));
    registry.register(books::create_module(store));
}
