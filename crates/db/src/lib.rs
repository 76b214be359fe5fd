//! # Bookstore Database Crate
//!
//! Owns everything about reaching PostgreSQL that is not specific to one
//! module: building connection options from settings, opening the pool,
//! checking liveness, and applying the idempotent schema statements that
//! modules contribute. Queries themselves live with the modules.

pub mod connection;
pub mod error;
pub mod schema;

pub use connection::{close, connect, connect_options, ping};
pub use error::DbError;
pub use schema::apply_schema;
