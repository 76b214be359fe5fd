use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on a book name, counted in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Genres are stored as small integer codes.
pub const GENRES: RangeInclusive<i32> = 1..=3;

/// A stored book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Server-assigned identifier
    pub id: i32,
    /// Unique display name
    pub name: String,
    /// Unit price
    pub price: Decimal,
    /// Genre code, one of [`GENRES`]
    pub genre: i32,
    /// Units in stock
    pub amount: i32,
}

impl Book {
    pub fn from_input(id: i32, input: BookInput) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            genre: input.genre,
            amount: input.amount,
        }
    }
}

/// Client payload for creating or replacing a book.
///
/// An `id` field in the body is ignored; the server owns identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInput {
    pub name: String,
    pub price: Decimal,
    pub genre: i32,
    pub amount: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must be between 1 and 100 characters, got {0}")]
    NameLength(usize),
    #[error("price must not be negative")]
    NegativePrice,
    #[error("genre must be between 1 and 3, got {0}")]
    Genre(i32),
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(i32),
}

impl BookInput {
    /// Check field rules before anything reaches the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name_chars = self.name.chars().count();
        if name_chars == 0 || name_chars > MAX_NAME_CHARS {
            return Err(ValidationError::NameLength(name_chars));
        }
        if self.price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice);
        }
        if !GENRES.contains(&self.genre) {
            return Err(ValidationError::Genre(self.genre));
        }
        if self.amount < 0 {
            return Err(ValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

/// Response body of a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBook {
    pub id: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unsupported filter key '{0}'")]
    UnsupportedKey(String),
    #[error("genre filter '{0}' is not a number")]
    InvalidGenre(String),
    #[error("genre filter {0} is out of range")]
    GenreOutOfRange(i32),
}

/// Restrictions for listing books. Empty means every book in stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub name: Option<String>,
    pub genre: Option<i32>,
}

impl BookFilter {
    /// Parse query pairs. Only `name` and `genre` are accepted; when a key is
    /// repeated the first value is used.
    pub fn from_query<I, K, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = BookFilter::default();
        let mut seen_genre = false;

        for (key, value) in pairs {
            match key.as_ref() {
                "name" => {
                    if filter.name.is_none() {
                        filter.name = Some(value.into());
                    }
                }
                "genre" => {
                    if seen_genre {
                        continue;
                    }
                    seen_genre = true;
                    let raw: String = value.into();
                    let genre: i32 = raw
                        .parse()
                        .map_err(|_| FilterError::InvalidGenre(raw.clone()))?;
                    if !GENRES.contains(&genre) {
                        return Err(FilterError::GenreOutOfRange(genre));
                    }
                    filter.genre = Some(genre);
                }
                other => return Err(FilterError::UnsupportedKey(other.to_string())),
            }
        }

        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.genre.is_none()
    }
}
