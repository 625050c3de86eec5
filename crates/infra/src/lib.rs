//! Infrastructure layer: configuration, SQLite pool, and repositories.

pub mod config;
pub mod db;
pub mod store;

pub use config::Settings;
pub use db::Database;
pub use store::{Page, StoreError};
