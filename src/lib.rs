/// datavista library
///
/// Project store, query engine and persistence for the DataVista
/// project browser.

pub mod config;
pub mod core;
pub mod db;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use crate::core::{ProjectStore, PROJECTS_KEY};
pub use db::Database;
pub use error::{DataVistaError, Result};
