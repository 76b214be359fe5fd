//! HTTP handlers for `/books`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use bookstore_http::error::AppError;

use super::models::{Book, BookFilter, BookInput, CreatedBook};
use super::store::{BookStore, StoreError};

pub const INVALID_FILTER: &str = "invalid filter condition";
pub const INVALID_INPUT: &str = "invalid input";
pub const ID_NOT_FOUND: &str = "id not found";
pub const NAME_NOT_UNIQUE: &str = "input book name is not unique";

pub type SharedStore = Arc<dyn BookStore>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::not_found(ID_NOT_FOUND, err),
            StoreError::DuplicateName(_) => AppError::failure(NAME_NOT_UNIQUE, err),
            StoreError::Database(_) => AppError::Internal(err.into()),
        }
    }
}

fn parse_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, AppError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| AppError::bad_request(INVALID_INPUT, rejection.body_text()))
}

fn parse_input(body: Result<Json<BookInput>, JsonRejection>) -> Result<BookInput, AppError> {
    let Json(input) =
        body.map_err(|rejection| AppError::bad_request(INVALID_INPUT, rejection.body_text()))?;
    input
        .validate()
        .map_err(|err| AppError::bad_request(INVALID_INPUT, err))?;
    Ok(input)
}

/// `GET /books[?name=..&genre=..]`
pub async fn list_books(
    State(store): State<SharedStore>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(pairs) =
        query.map_err(|rejection| AppError::bad_request(INVALID_FILTER, rejection.body_text()))?;
    let filter =
        BookFilter::from_query(pairs).map_err(|err| AppError::bad_request(INVALID_FILTER, err))?;

    let books = store.list(&filter).await?;
    tracing::debug!(filtered = !filter.is_empty(), count = books.len(), "listed books");

    Ok(Json(books))
}

/// `POST /books`
pub async fn create_book(
    State(store): State<SharedStore>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<CreatedBook>, AppError> {
    let input = parse_input(body)?;

    let id = store.create(&input).await?;
    tracing::info!(id, name = %input.name, "book created");

    Ok(Json(CreatedBook { id }))
}

/// `GET /books/{id}`
pub async fn get_book(
    State(store): State<SharedStore>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(id)?;
    let book = store.get_by_id(id).await?;
    Ok(Json(book))
}

/// `PUT /books/{id}`; the path id always wins over one in the body.
pub async fn update_book(
    State(store): State<SharedStore>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let id = parse_id(id)?;
    let input = parse_input(body)?;

    store.update(id, &input).await?;
    tracing::info!(id, "book updated");

    Ok(Json(Book::from_input(id, input)))
}

/// `DELETE /books/{id}`
pub async fn delete_book(
    State(store): State<SharedStore>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;

    store.delete(id).await?;
    tracing::info!(id, "book deleted");

    Ok(StatusCode::NO_CONTENT)
}
