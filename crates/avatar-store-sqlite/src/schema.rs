//! SQL schema for the avatar host store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `posts.author_id` and `comments.user_id` deliberately carry no foreign
/// key: deleting a user leaves their posts and comments behind, and avatar
/// resolution falls back to the email stored on the comment.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    login  TEXT NOT NULL UNIQUE,
    email  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS posts (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       INTEGER,          -- NULL for guests
    author_email  TEXT,
    comment_type  TEXT              -- NULL or '' for ordinary comments
);

PRAGMA user_version = 1;
";
