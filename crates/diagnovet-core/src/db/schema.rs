//! SQLite schema definition.

/// Complete schema for the session store.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Session Entries (key -> JSON text)
-- ============================================================================

CREATE TABLE IF NOT EXISTS session_entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- JSON document
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_session_entries_updated ON session_entries(updated_at);
"#;
