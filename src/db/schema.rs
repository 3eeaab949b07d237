//! SQL DDL for the content store.

/// SQLite schema with:
/// - `content`: page copy, UNIQUE(section, key) backs the upsert path
/// - `admin_credentials`: UNIQUE username
/// - timestamps as RFC3339 TEXT
/// - an index on `content(section)` for filtered listing
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS content (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    section TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL, -- RFC3339
    UNIQUE (section, key)
);

CREATE INDEX IF NOT EXISTS idx_content_section ON content(section);

CREATE TABLE IF NOT EXISTS admin_credentials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL -- RFC3339
);
"#;
