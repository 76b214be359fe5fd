//! Persistence for books.
//!
//! Every operation runs in its own transaction. A transaction that is dropped
//! before `commit` is rolled back by the driver, so each early `?` return
//! below leaves the table untouched.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use thiserror::Error;

use super::models::{Book, BookFilter, BookInput};

const SELECT_IN_STOCK: &str = "SELECT id, name, price, genre, amount FROM books WHERE amount > 0";

/// Failures a store reports. Only the first two are meaningful to callers;
/// everything else is passed through as-is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("book not found")]
    NotFound,

    #[error("book name is not unique: {0}")]
    DuplicateName(String),

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            // SQLSTATE 23505
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateName(db.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// In-stock books passing `filter`, newest first. No match is an empty list.
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError>;

    /// Insert a book and return its new identifier.
    async fn create(&self, book: &BookInput) -> Result<i32, StoreError>;

    async fn get_by_id(&self, id: i32) -> Result<Book, StoreError>;

    /// Overwrite every field of the book with identifier `id`.
    async fn update(&self, id: i32, book: &BookInput) -> Result<(), StoreError>;

    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

/// Build the list query for whichever filter fields are present.
pub(crate) fn list_query(filter: &BookFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(SELECT_IN_STOCK);

    if let Some(name) = filter.name.as_deref() {
        query.push(" AND name = ").push_bind(name);
    }
    if let Some(genre) = filter.genre {
        query.push(" AND genre = ").push_bind(genre);
    }

    query.push(" ORDER BY id DESC");
    query
}

/// [`BookStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let mut query = list_query(filter);
        let books = query
            .build_query_as::<Book>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(books)
    }

    async fn create(&self, book: &BookInput) -> Result<i32, StoreError> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO books (name, price, genre, amount) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&book.name)
        .bind(book.price)
        .bind(book.genre)
        .bind(book.amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> Result<Book, StoreError> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            "SELECT id, name, price, genre, amount FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        tx.commit().await?;
        Ok(book)
    }

    async fn update(&self, id: i32, book: &BookInput) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE books SET name = $1, price = $2, genre = $3, amount = $4 WHERE id = $5",
        )
        .bind(&book.name)
        .bind(book.price)
        .bind(book.genre)
        .bind(book.amount)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}
