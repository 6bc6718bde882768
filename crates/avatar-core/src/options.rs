//! Caller options and their normalized form.
//!
//! [`AvatarOptions`] is what a caller hands in: loose, partially filled,
//! possibly nonsensical. [`ProcessedOptions`] is the canonical copy the URL
//! resolver produces and returns alongside its result; the caller's value is
//! never modified.

use serde::{Deserialize, Serialize};

/// Edge length used whenever the requested size is unusable.
pub const DEFAULT_SIZE: u64 = 96;

/// Token the avatar service understands as "mystery person".
pub const MYSTERY: &str = "mm";

// ─── Size ─────────────────────────────────────────────────────────────────────

/// A requested edge length in pixels, as given by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvatarSize {
  Number(i64),
  Text(String),
}

impl Default for AvatarSize {
  fn default() -> Self { Self::Number(DEFAULT_SIZE as i64) }
}

impl From<i64> for AvatarSize {
  fn from(n: i64) -> Self { Self::Number(n) }
}

impl From<&str> for AvatarSize {
  fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl AvatarSize {
  /// Absolute integer value of a numeric size; zero or non-numeric input
  /// becomes [`DEFAULT_SIZE`]. Fractional text is truncated.
  pub fn normalize(&self) -> u64 {
    let size = match self {
      Self::Number(n) => n.unsigned_abs(),
      Self::Text(s) => match s.trim().parse::<f64>() {
        Ok(f) if f.is_finite() => f.trunc().abs() as u64,
        _ => 0,
      },
    };
    if size == 0 { DEFAULT_SIZE } else { size }
  }
}

// ─── Default image ────────────────────────────────────────────────────────────

/// Canonicalize a default-image token.
///
/// Returns `None` when the `d` query parameter must be left out so the
/// service falls back to its own logo.
pub fn normalize_default_image(value: &str) -> Option<String> {
  let value = if value.is_empty() { "mystery" } else { value };
  match value {
    "mm" | "mystery" | "mysteryman" => Some(MYSTERY.to_string()),
    "gravatar_default" => None,
    other => Some(other.to_string()),
  }
}

// ─── Classes ──────────────────────────────────────────────────────────────────

/// Extra CSS classes: either one whitespace-delimited string or a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassList {
  #[default]
  None,
  One(String),
  Many(Vec<String>),
}

impl ClassList {
  /// Individual class tokens in the order given.
  pub fn tokens(&self) -> Vec<String> {
    let parts: &[String] = match self {
      Self::None => &[],
      Self::One(s) => std::slice::from_ref(s),
      Self::Many(v) => v,
    };
    parts
      .iter()
      .flat_map(|p| p.split_whitespace())
      .map(str::to_string)
      .collect()
  }
}

impl From<&str> for ClassList {
  fn from(s: &str) -> Self { Self::One(s.to_string()) }
}

impl From<Vec<String>> for ClassList {
  fn from(v: Vec<String>) -> Self { Self::Many(v) }
}

// ─── Options ──────────────────────────────────────────────────────────────────

/// Options as supplied by the caller.
///
/// `default_image` and `rating` fall back to the host's site options when
/// `None`. `alt`, `class` and `force_display` only matter when rendering a
/// tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarOptions {
  pub size:          AvatarSize,
  pub default_image: Option<String>,
  pub force_default: bool,
  pub rating:        Option<String>,
  pub scheme:        Option<String>,
  pub alt:           String,
  pub class:         ClassList,
  pub force_display: bool,
}

impl AvatarOptions {
  /// Options from the positional `(size, default, alt)` calling form.
  ///
  /// The default image is always explicit here, so an empty one means
  /// "mystery" rather than the site's configured default.
  pub fn legacy(
    size: impl Into<AvatarSize>,
    default_image: impl Into<String>,
    alt: impl Into<String>,
  ) -> Self {
    Self {
      size: size.into(),
      default_image: Some(default_image.into()),
      alt: alt.into(),
      ..Self::default()
    }
  }

  pub fn with_size(mut self, size: impl Into<AvatarSize>) -> Self {
    self.size = size.into();
    self
  }

  pub fn with_default_image(mut self, default: impl Into<String>) -> Self {
    self.default_image = Some(default.into());
    self
  }

  pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
    self.rating = Some(rating.into());
    self
  }

  pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
    self.scheme = Some(scheme.into());
    self
  }

  pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
    self.alt = alt.into();
    self
  }

  pub fn with_class(mut self, class: impl Into<ClassList>) -> Self {
    self.class = class.into();
    self
  }
}

/// The canonical options produced by URL resolution.
///
/// Invariants: `size > 0`; `default_image`, when present, is non-empty;
/// `rating` is lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedOptions {
  pub size:          u64,
  /// `None` means "omit the `d` parameter".
  pub default_image: Option<String>,
  pub force_default: bool,
  pub rating:        String,
  pub scheme:        Option<String>,
  pub alt:           String,
  pub class:         Vec<String>,
  pub force_display: bool,
  /// Whether an email or hash was actually resolved. Left `false` when a
  /// pre-hook supplied the URL.
  pub found_avatar:  bool,
}
