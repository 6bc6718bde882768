//! SQLite-backed host for avatar resolution.
//!
//! Stores the users, posts and comments avatars are requested for, and
//! answers [`avatar_core::HostServices`] lookups from them. Access is
//! synchronous; the connection sits behind a mutex so one host can be shared
//! across threads.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteHost;
