/// Database module for datavista
///
/// Key/value persistence on SQLite via sqlx, plus the persisted data models.

pub mod connection;
pub mod models;
pub mod queries;

pub use connection::{Database, DatabaseStats};
pub use models::*;
