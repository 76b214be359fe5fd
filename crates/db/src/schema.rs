use bookstore_kernel::SchemaStatement;
use sqlx::PgPool;

use crate::error::DbError;

/// Execute module schema statements in order.
///
/// Statements are expected to be idempotent, so this runs on every startup.
/// Execution stops at the first failing statement.
pub async fn apply_schema(
    pool: &PgPool,
    statements: &[(String, SchemaStatement)],
) -> Result<(), DbError> {
    for (module, statement) in statements {
        tracing::info!(
            target: "bookstore-db",
            module = %module,
            id = statement.id,
            "applying schema statement"
        );

        sqlx::raw_sql(statement.sql)
            .execute(pool)
            .await
            .map_err(|source| DbError::Schema {
                module: module.clone(),
                id: statement.id,
                source,
            })?;
    }

    Ok(())
}
