//! Database schema and migrations.
//!
//! Migrations are applied in order when the database is opened. The
//! schema_version table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    r#"
-- One row per account; password_hash and salt are always written together
CREATE TABLE users (
    user_id       TEXT PRIMARY KEY NOT NULL,
    username      TEXT NOT NULL,
    password_hash TEXT NOT NULL CHECK (password_hash <> ''),  -- Argon2 PHC string
    salt          TEXT NOT NULL CHECK (salt <> ''),           -- base64, 16 bytes
    created_at    TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at    TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
];
