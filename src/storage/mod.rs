//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with a single table:
//! - bookmark_folder(title, icon, links)
//!
//! The `Database` handle owns the connection lifecycle; folder operations
//! borrow the connection and never open or close it themselves.

pub mod schema;
pub mod sqlite;

pub use sqlite::Database;
