//! The suppression outcome shared by URL and tag resolution.

use thiserror::Error;

/// A deliberate "no avatar" outcome.
///
/// This is not a failure: it is the expected result when avatars are hidden,
/// when the subject is a comment type that never carries an avatar, or when a
/// hook left nothing usable to render. It lives on the `Err` side of the
/// resolution results so callers can use `?` to bail out early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Suppressed {
  #[error("no avatars for comments of type {0:?}")]
  CommentType(String),

  #[error("avatars are disabled for this site")]
  AvatarsHidden,

  #[error("no avatar url could be resolved")]
  NoUrl,
}
