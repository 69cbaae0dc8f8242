//! Database schema definitions

/// SQL to create the bookmark_folder table.
///
/// The links mapping is stored denormalized as one JSON object per row;
/// the icon column holds base64 text (see `folder` for the encoding policy).
pub const CREATE_BOOKMARK_FOLDER_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bookmark_folder (
    title TEXT PRIMARY KEY,
    icon TEXT,
    links TEXT
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_BOOKMARK_FOLDER_TABLE]
}
