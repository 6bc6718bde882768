//! Error type for `avatar-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("user not found: {0}")]
  UserNotFound(u64),

  /// The connection mutex was poisoned by a panicking thread.
  #[error("store connection poisoned")]
  Poisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
