//! What an avatar is requested for.
//!
//! Historically the identifier was a single loosely typed argument whose
//! shape was sniffed at runtime. Here every shape is an explicit variant of
//! [`AvatarSubject`]; [`AvatarSubject::from_identifier`] folds the three
//! string-ish shapes (user id, email, hash) for callers that only have text.

use serde::{Deserialize, Serialize};

/// Domain suffix that marks an identifier as an already-computed hash.
pub const HASH_DOMAIN: &str = "@md5.gravatar.com";

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
  pub id:    u64,
  pub login: String,
  pub email: String,
}

/// A post; only its author matters for avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
  pub id:        u64,
  pub author_id: u64,
}

/// A comment left by a registered user or a guest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
  pub id:           u64,
  /// `None` (or `Some(0)`) for guest comments.
  pub user_id:      Option<u64>,
  /// Email captured with the comment; the fallback when the user is gone.
  pub author_email: Option<String>,
  /// `None` or empty for ordinary comments; e.g. `"pingback"` otherwise.
  pub comment_type: Option<String>,
}

/// The entity an avatar is requested for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AvatarSubject {
  /// A user id. Negative ids are looked up by absolute value.
  UserId(i64),
  Email(String),
  /// A precomputed email hash; no lookup or hashing happens.
  Hash(String),
  User(UserRecord),
  Post(PostRecord),
  Comment(CommentRecord),
}

impl AvatarSubject {
  /// Interpret a free-form identifier.
  ///
  /// - numeric text (integer, decimal or exponent form) →
  ///   [`AvatarSubject::UserId`], truncated toward zero
  /// - `"{hash}@md5.gravatar.com"` → [`AvatarSubject::Hash`]
  /// - anything else → [`AvatarSubject::Email`]
  ///
  /// The hash suffix only counts when something precedes it, so a bare
  /// `"@md5.gravatar.com"` is treated as an (unusable) email.
  pub fn from_identifier(input: &str) -> Self {
    let trimmed = input.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
      return Self::UserId(id);
    }
    if let Ok(number) = trimmed.parse::<f64>()
      && number.is_finite()
    {
      return Self::UserId(number.trunc() as i64);
    }
    match input.find(HASH_DOMAIN) {
      Some(pos) if pos > 0 => {
        let hash = input.split('@').next().unwrap_or_default();
        Self::Hash(hash.to_string())
      }
      _ => Self::Email(input.to_string()),
    }
  }
}

impl From<UserRecord> for AvatarSubject {
  fn from(user: UserRecord) -> Self { Self::User(user) }
}

impl From<PostRecord> for AvatarSubject {
  fn from(post: PostRecord) -> Self { Self::Post(post) }
}

impl From<CommentRecord> for AvatarSubject {
  fn from(comment: CommentRecord) -> Self { Self::Comment(comment) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numeric_identifiers_are_user_ids() {
    assert_eq!(AvatarSubject::from_identifier("42"), AvatarSubject::UserId(42));
    assert_eq!(AvatarSubject::from_identifier("-7"), AvatarSubject::UserId(-7));
    assert_eq!(AvatarSubject::from_identifier("12.5"), AvatarSubject::UserId(12));
    assert_eq!(AvatarSubject::from_identifier("1e3"), AvatarSubject::UserId(1000));
    assert_eq!(AvatarSubject::from_identifier(" 3 "), AvatarSubject::UserId(3));
  }

  #[test]
  fn non_finite_numbers_are_emails() {
    assert_eq!(
      AvatarSubject::from_identifier("inf"),
      AvatarSubject::Email("inf".into())
    );
    assert_eq!(
      AvatarSubject::from_identifier("NaN"),
      AvatarSubject::Email("NaN".into())
    );
  }

  #[test]
  fn hash_domain_yields_hash() {
    let subject = AvatarSubject::from_identifier(
      "572c3489ea700045927076136a969e27@md5.gravatar.com",
    );
    assert_eq!(
      subject,
      AvatarSubject::Hash("572c3489ea700045927076136a969e27".into())
    );
  }

  #[test]
  fn leading_hash_domain_is_an_email() {
    assert_eq!(
      AvatarSubject::from_identifier("@md5.gravatar.com"),
      AvatarSubject::Email("@md5.gravatar.com".into())
    );
  }

  #[test]
  fn emails_keep_their_whitespace() {
    assert_eq!(
      AvatarSubject::from_identifier(" User@Example.org\t"),
      AvatarSubject::Email(" User@Example.org\t".into())
    );
  }
}
