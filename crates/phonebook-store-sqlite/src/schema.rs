//! SQL schema for the phonebook SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids monotonic: a deleted id is never handed out again.
CREATE TABLE IF NOT EXISTS contact (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    no_telp  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
