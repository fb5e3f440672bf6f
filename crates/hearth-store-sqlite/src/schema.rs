//! SQL schema for the Hearth SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` preserves insertion order; `id` is the public identity.
CREATE TABLE IF NOT EXISTS profiles (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    picture     TEXT NOT NULL,
    friends     TEXT NOT NULL DEFAULT '[]',   -- JSON array of {\"id\": n}
    password    TEXT NOT NULL
);

-- Messages are append-only.
CREATE TABLE IF NOT EXISTS messages (
    seq      INTEGER PRIMARY KEY AUTOINCREMENT,
    author   TEXT NOT NULL,
    contents TEXT NOT NULL
);

PRAGMA user_version = 1;
";
