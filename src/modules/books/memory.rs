//! In-process [`BookStore`] used to exercise handlers without a database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::models::{Book, BookFilter, BookInput};
use super::store::{BookStore, StoreError};

#[derive(Default)]
pub struct MemoryBookStore {
    rows: Mutex<Rows>,
    calls: AtomicUsize,
    broken: AtomicBool,
}

#[derive(Default)]
struct Rows {
    last_id: i32,
    books: BTreeMap<i32, Book>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every following operation fail with an opaque database error.
    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Rows>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(self.rows.lock().expect("memory store lock poisoned"))
    }
}

impl Rows {
    fn check_unique(&self, name: &str, except: Option<i32>) -> Result<(), StoreError> {
        let taken = self
            .books
            .values()
            .any(|book| book.name == name && Some(book.id) != except);
        if taken {
            return Err(StoreError::DuplicateName(format!(
                "duplicate key value violates unique constraint \"books_name_key\": {name}"
            )));
        }
        Ok(())
    }
}

/// In stock and equal on every present filter field.
fn listed(filter: &BookFilter, book: &Book) -> bool {
    book.amount > 0
        && filter.name.as_deref().map_or(true, |name| book.name == name)
        && filter.genre.map_or(true, |genre| book.genre == genre)
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let rows = self.enter()?;
        Ok(rows
            .books
            .values()
            .rev()
            .filter(|book| listed(filter, book))
            .cloned()
            .collect())
    }

    async fn create(&self, book: &BookInput) -> Result<i32, StoreError> {
        let mut rows = self.enter()?;
        rows.check_unique(&book.name, None)?;

        rows.last_id += 1;
        let id = rows.last_id;
        rows.books.insert(id, Book::from_input(id, book.clone()));
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> Result<Book, StoreError> {
        let rows = self.enter()?;
        rows.books.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: i32, book: &BookInput) -> Result<(), StoreError> {
        let mut rows = self.enter()?;
        if !rows.books.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        rows.check_unique(&book.name, Some(id))?;
        rows.books.insert(id, Book::from_input(id, book.clone()));
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut rows = self.enter()?;
        rows.books.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(name: &str, genre: i32, amount: i32) -> BookInput {
        BookInput {
            name: name.to_string(),
            price: dec!(1),
            genre,
            amount,
        }
    }

    #[tokio::test]
    async fn list_skips_sold_out_and_applies_filters() {
        let store = MemoryBookStore::new();
        let dune = store.create(&input("Dune", 2, 3)).await.unwrap();
        store.create(&input("Sold out", 2, 0)).await.unwrap();
        let emma = store.create(&input("Emma", 1, 1)).await.unwrap();

        let all: Vec<i32> = store
            .list(&BookFilter::default())
            .await
            .unwrap()
            .iter()
            .map(|book| book.id)
            .collect();
        assert_eq!(all, vec![emma, dune]);

        let genre_two = store
            .list(&BookFilter {
                name: None,
                genre: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(genre_two.len(), 1);
        assert_eq!(genre_two[0].id, dune);

        let no_match = store
            .list(&BookFilter {
                name: Some("Dune".to_string()),
                genre: Some(1),
            })
            .await
            .unwrap();
        assert!(no_match.is_empty());
    }
}
