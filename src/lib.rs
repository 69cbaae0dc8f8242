//! # Bookmark Box - bookmark folder persistence
//!
//! A small persistence layer for named bookmark folders backed by SQLite.
//!
//! Bookmark Box provides:
//! - The `BookmarkFolder` entity: a title, a display icon, and a
//!   name -> URL links mapping
//! - A storage handle owning the SQLite connection lifecycle
//! - Save (upsert), load-by-title, and list-all-titles operations
//! - Icon generation collaborators for folders created without an icon

pub mod config;
pub mod folder;
pub mod icon;
pub mod storage;

// Re-exports for convenient access
pub use folder::BookmarkFolder;
pub use icon::{GlyphBadge, IconSource};
pub use storage::Database;

/// Result type alias for Bookmark Box operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bookmark Box operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("No bookmark folder titled '{0}' exists in the database")]
    FolderNotFound(String),

    #[error("Invalid links data stored for folder '{title}': {source}")]
    LinkData {
        title: String,
        source: serde_json::Error,
    },

    #[error("Invalid icon data stored for folder '{title}': {source}")]
    IconData {
        title: String,
        source: base64::DecodeError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
