//! The `HostServices` trait: everything avatar resolution needs from the
//! surrounding platform.
//!
//! Record lookup, site options and request context come from the host, as do
//! the four extension hooks. Every method except [`HostServices::get_user_by_id`]
//! has a default matching a stock installation, so a minimal host only has
//! to know how to find users.

use serde::{Deserialize, Serialize};

use crate::{
  options::{AvatarOptions, ProcessedOptions},
  subject::{AvatarSubject, UserRecord},
};

/// A value produced or replaced by a hook.
///
/// Hooks may substitute anything, including `0`, `false` or `null`; the
/// resolvers pass such values through untouched.
pub type HookValue = serde_json::Value;

/// Comment types that carry avatars on a stock installation.
pub const DEFAULT_COMMENT_TYPES: &[&str] = &["comment"];

// ─── Site options ─────────────────────────────────────────────────────────────

/// The site-wide options backing avatar display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
  /// Master switch for avatar tags.
  pub show_avatars:   bool,
  /// Default image token or URL used when a caller does not pick one.
  pub avatar_default: String,
  /// Maximum rating (`G`, `PG`, `R`, `X`); empty for no `r` parameter.
  pub avatar_rating:  String,
  /// Comment types that may carry avatars, before hook filtering.
  pub comment_types:  Vec<String>,
}

impl Default for SiteOptions {
  fn default() -> Self {
    Self {
      show_avatars:   true,
      avatar_default: "mystery".to_string(),
      avatar_rating:  String::new(),
      comment_types:  DEFAULT_COMMENT_TYPES.iter().map(|s| s.to_string()).collect(),
    }
  }
}

// ─── Trait ────────────────────────────────────────────────────────────────────

/// Collaborator supplied by the platform embedding the avatar resolvers.
///
/// All methods are synchronous. Lookups that fail for any reason should
/// answer `None`; resolution then degrades to the default image.
pub trait HostServices {
  /// Find a user by id. Ids are always non-negative here.
  fn get_user_by_id(&self, id: u64) -> Option<UserRecord>;

  /// Comment types for which an avatar may be computed.
  fn allowed_comment_types(&self) -> Vec<String> {
    DEFAULT_COMMENT_TYPES.iter().map(|s| s.to_string()).collect()
  }

  fn show_avatars(&self) -> bool { true }

  fn default_avatar_option(&self) -> String { "mystery".to_string() }

  fn avatar_rating_option(&self) -> String { String::new() }

  /// Whether the current request arrived over an encrypted connection.
  fn is_ssl(&self) -> bool { false }

  // ── Hooks ─────────────────────────────────────────────────────────────

  /// Short-circuit URL resolution. `Some` skips lookup and hashing.
  fn pre_get_avatar_url(
    &self,
    _subject: &AvatarSubject,
    _options: &mut ProcessedOptions,
  ) -> Option<HookValue> {
    None
  }

  /// Post-process a resolved URL.
  fn get_avatar_url_filter(
    &self,
    url: HookValue,
    _subject: &AvatarSubject,
    _options: &mut ProcessedOptions,
  ) -> HookValue {
    url
  }

  /// Short-circuit tag rendering. `Some` skips everything else.
  fn pre_get_avatar(
    &self,
    _subject: &AvatarSubject,
    _options: &AvatarOptions,
  ) -> Option<HookValue> {
    None
  }

  /// Post-process rendered tag HTML.
  fn get_avatar_filter(
    &self,
    html: HookValue,
    _subject: &AvatarSubject,
    _options: &AvatarOptions,
  ) -> HookValue {
    html
  }
}
