//! Bookmark folder entity and its persistence operations
//!
//! A `BookmarkFolder` is the sole entity: a title (primary key), a display
//! icon, and a name -> URL links mapping. The mapping is stored as one JSON
//! object inside the `links` text column, never normalized into a second
//! table.
//!
//! Icon encoding policy: icons are opaque bytes in memory and are
//! base64-encoded into the `icon` TEXT column on save, decoded on load.
//! Callers holding an icon URL resolve it to bytes first (an `IconSource`
//! collaborator concern); the store itself never fetches or validates.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::icon::IconSource;
use crate::{Error, Result};

/// A named folder of bookmarks.
///
/// Constructed in memory and persisted only explicitly via [`save`].
/// Saving twice under one title replaces the whole row; there is no merge,
/// no rename, and (deliberately, matching the store's contract) no delete.
///
/// [`save`]: BookmarkFolder::save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkFolder {
    /// Folder title, the unique lookup key
    pub title: String,
    /// Opaque icon bytes (raw image data or whatever the caller supplied)
    #[serde(with = "base64_bytes")]
    pub icon: Vec<u8>,
    /// Display name -> URL; BTreeMap keeps serialization order stable
    pub links: BTreeMap<String, String>,
}

impl BookmarkFolder {
    /// Create a folder from parts. Pure: no icon generation happens here.
    pub fn new(
        title: impl Into<String>,
        icon: Vec<u8>,
        links: BTreeMap<String, String>,
    ) -> Self {
        Self {
            title: title.into(),
            icon,
            links,
        }
    }

    /// Create a folder with a default icon supplied by the given collaborator.
    ///
    /// The explicit call site keeps plain construction pure while still
    /// guaranteeing every folder carries a non-empty icon.
    pub fn with_generated_icon(
        icons: &dyn IconSource,
        glyph: &str,
        title: impl Into<String>,
        links: BTreeMap<String, String>,
    ) -> Result<Self> {
        let icon = icons.icon_bytes(glyph)?;
        Ok(Self::new(title, icon, links))
    }

    /// Set or overwrite a link. Purely in-memory until the next save;
    /// URLs are not validated.
    pub fn add_link(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.links.insert(name.into(), url.into());
    }

    /// JSON representation of the whole folder (icon as base64 text)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a folder from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Upsert this folder into the database.
    ///
    /// Insert-or-replace keyed by title: a title conflict replaces the
    /// entire row. The statement autocommits, so a successful return means
    /// a subsequent load observes exactly what was saved.
    pub fn save(&self, conn: &Connection) -> Result<()> {
        let links_json = serde_json::to_string(&self.links)?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO bookmark_folder (title, icon, links)
            VALUES (?1, ?2, ?3)
            "#,
            params![self.title, BASE64.encode(&self.icon), links_json],
        )?;
        tracing::debug!(
            "saved folder '{}' ({} links, {} icon bytes)",
            self.title,
            self.links.len(),
            self.icon.len()
        );
        Ok(())
    }

    /// Load a folder by exact title match.
    ///
    /// A missing title is `Error::FolderNotFound`, an expected condition
    /// callers branch on. Corrupt column data surfaces as `Error::LinkData`
    /// or `Error::IconData`, never as a silently empty folder.
    pub fn load(conn: &Connection, title: &str) -> Result<Self> {
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT icon, links FROM bookmark_folder WHERE title = ?1",
                [title],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (icon_text, links_json) =
            row.ok_or_else(|| Error::FolderNotFound(title.to_string()))?;

        let icon = BASE64
            .decode(icon_text.as_bytes())
            .map_err(|source| Error::IconData {
                title: title.to_string(),
                source,
            })?;
        let links =
            serde_json::from_str(&links_json).map_err(|source| Error::LinkData {
                title: title.to_string(),
                source,
            })?;

        Ok(Self {
            title: title.to_string(),
            icon,
            links,
        })
    }

    /// Titles of all folders currently stored, in storage order.
    /// No ordering is guaranteed; treat the result as a set.
    pub fn list_titles(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT title FROM bookmark_folder")?;
        let titles = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(titles)
    }
}

impl fmt::Display for BookmarkFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BookmarkFolder(title={}, icon={} bytes, links={})",
            self.title,
            self.icon.len(),
            self.links.len()
        )
    }
}

/// Serde helper storing icon bytes as base64 text in JSON
mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        BASE64.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        BASE64.decode(text.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::GlyphBadge;
    use crate::storage::Database;

    fn sample_folder(title: &str) -> BookmarkFolder {
        let mut links = BTreeMap::new();
        links.insert("Google".to_string(), "https://www.google.com".to_string());
        links.insert(
            "Facebook".to_string(),
            "https://www.facebook.com".to_string(),
        );
        BookmarkFolder::new(title, vec![0x89, 0x50, 0x4e, 0x47], links)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let db = Database::open_in_memory().unwrap();

        let folder = sample_folder("My Bookmarks");
        folder.save(db.conn()).unwrap();

        let loaded = BookmarkFolder::load(db.conn(), "My Bookmarks").unwrap();
        assert_eq!(loaded, folder);
    }

    #[test]
    fn test_roundtrip_empty_links() {
        let db = Database::open_in_memory().unwrap();

        let folder = BookmarkFolder::new("Empty", vec![1, 2, 3], BTreeMap::new());
        folder.save(db.conn()).unwrap();

        let loaded = BookmarkFolder::load(db.conn(), "Empty").unwrap();
        assert_eq!(loaded.links.len(), 0);
        assert_eq!(loaded.icon, vec![1, 2, 3]);
    }

    #[test]
    fn test_upsert_replaces_whole_row() {
        let db = Database::open_in_memory().unwrap();

        let mut links = BTreeMap::new();
        links.insert("A".to_string(), "https://a.example".to_string());
        BookmarkFolder::new("T", vec![1], links).save(db.conn()).unwrap();

        let mut links = BTreeMap::new();
        links.insert("B".to_string(), "https://b.example".to_string());
        BookmarkFolder::new("T", vec![2], links).save(db.conn()).unwrap();

        let loaded = BookmarkFolder::load(db.conn(), "T").unwrap();
        assert_eq!(loaded.icon, vec![2]);
        assert_eq!(loaded.links.len(), 1);
        assert!(!loaded.links.contains_key("A"));
        assert_eq!(loaded.links["B"], "https://b.example");

        // overwrites collapse to one row per title
        assert_eq!(BookmarkFolder::list_titles(db.conn()).unwrap().len(), 1);
    }

    #[test]
    fn test_load_missing_title_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        sample_folder("Present").save(db.conn()).unwrap();

        let err = BookmarkFolder::load(db.conn(), "Nonexistent Folder").unwrap_err();
        match err {
            Error::FolderNotFound(title) => assert_eq!(title, "Nonexistent Folder"),
            other => panic!("expected FolderNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_list_titles_is_set_of_saved_titles() {
        let db = Database::open_in_memory().unwrap();

        for title in ["X", "Y", "Z"] {
            sample_folder(title).save(db.conn()).unwrap();
        }

        let mut titles = BookmarkFolder::list_titles(db.conn()).unwrap();
        titles.sort();
        assert_eq!(titles, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_add_link_is_local_until_saved() {
        let db = Database::open_in_memory().unwrap();

        let mut folder = sample_folder("My Bookmarks");
        folder.save(db.conn()).unwrap();

        folder.add_link("Reddit", "https://www.reddit.com");
        assert_eq!(folder.links["Reddit"], "https://www.reddit.com");

        // not persisted yet
        let stored = BookmarkFolder::load(db.conn(), "My Bookmarks").unwrap();
        assert!(!stored.links.contains_key("Reddit"));

        folder.save(db.conn()).unwrap();
        let stored = BookmarkFolder::load(db.conn(), "My Bookmarks").unwrap();
        assert_eq!(stored.links["Reddit"], "https://www.reddit.com");
    }

    #[test]
    fn test_corrupt_links_column_is_reported() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO bookmark_folder (title, icon, links) VALUES (?1, ?2, ?3)",
                ["Broken", "aWNvbg==", "not json"],
            )
            .unwrap();

        let err = BookmarkFolder::load(db.conn(), "Broken").unwrap_err();
        assert!(matches!(err, Error::LinkData { .. }));
    }

    #[test]
    fn test_corrupt_icon_column_is_reported() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO bookmark_folder (title, icon, links) VALUES (?1, ?2, ?3)",
                ["Broken", "%%% not base64 %%%", "{}"],
            )
            .unwrap();

        let err = BookmarkFolder::load(db.conn(), "Broken").unwrap_err();
        assert!(matches!(err, Error::IconData { .. }));
    }

    #[test]
    fn test_json_roundtrip() {
        let folder = sample_folder("My Bookmarks");
        let json = folder.to_json().unwrap();
        let parsed = BookmarkFolder::from_json(&json).unwrap();
        assert_eq!(parsed, folder);
    }

    #[test]
    fn test_generated_icon_is_non_empty() {
        let folder = BookmarkFolder::with_generated_icon(
            &GlyphBadge::new(),
            "😎",
            "test",
            BTreeMap::new(),
        )
        .unwrap();
        assert!(!folder.icon.is_empty());
    }
}
