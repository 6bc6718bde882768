//! Closure-backed hooks that concrete hosts embed.
//!
//! Each hook slot holds at most one handler. A host stores a [`Hooks`] value
//! and forwards the hook methods of [`HostServices`](crate::HostServices) to
//! it, which keeps the extension points explicit and per-host rather than
//! global.

use std::fmt;

use crate::{
  host::HookValue,
  options::{AvatarOptions, ProcessedOptions},
  subject::AvatarSubject,
};

pub type PreUrlHook =
  Box<dyn Fn(&AvatarSubject, &mut ProcessedOptions) -> Option<HookValue> + Send + Sync>;
pub type UrlFilter = Box<
  dyn Fn(HookValue, &AvatarSubject, &mut ProcessedOptions) -> HookValue + Send + Sync,
>;
pub type PreTagHook =
  Box<dyn Fn(&AvatarSubject, &AvatarOptions) -> Option<HookValue> + Send + Sync>;
pub type TagFilter =
  Box<dyn Fn(HookValue, &AvatarSubject, &AvatarOptions) -> HookValue + Send + Sync>;
pub type CommentTypesFilter = Box<dyn Fn(Vec<String>) -> Vec<String> + Send + Sync>;

/// The set of installed hook handlers.
#[derive(Default)]
pub struct Hooks {
  pre_get_avatar_url: Option<PreUrlHook>,
  get_avatar_url:     Option<UrlFilter>,
  pre_get_avatar:     Option<PreTagHook>,
  get_avatar:         Option<TagFilter>,
  comment_types:      Option<CommentTypesFilter>,
}

impl Hooks {
  pub fn new() -> Self { Self::default() }

  pub fn on_pre_get_avatar_url<F>(mut self, f: F) -> Self
  where
    F: Fn(&AvatarSubject, &mut ProcessedOptions) -> Option<HookValue>
      + Send
      + Sync
      + 'static,
  {
    self.pre_get_avatar_url = Some(Box::new(f));
    self
  }

  pub fn on_get_avatar_url<F>(mut self, f: F) -> Self
  where
    F: Fn(HookValue, &AvatarSubject, &mut ProcessedOptions) -> HookValue
      + Send
      + Sync
      + 'static,
  {
    self.get_avatar_url = Some(Box::new(f));
    self
  }

  pub fn on_pre_get_avatar<F>(mut self, f: F) -> Self
  where
    F: Fn(&AvatarSubject, &AvatarOptions) -> Option<HookValue>
      + Send
      + Sync
      + 'static,
  {
    self.pre_get_avatar = Some(Box::new(f));
    self
  }

  pub fn on_get_avatar<F>(mut self, f: F) -> Self
  where
    F: Fn(HookValue, &AvatarSubject, &AvatarOptions) -> HookValue
      + Send
      + Sync
      + 'static,
  {
    self.get_avatar = Some(Box::new(f));
    self
  }

  /// Adjust the comment types that may carry avatars.
  pub fn on_comment_types<F>(mut self, f: F) -> Self
  where
    F: Fn(Vec<String>) -> Vec<String> + Send + Sync + 'static,
  {
    self.comment_types = Some(Box::new(f));
    self
  }

  // ── Dispatch ──────────────────────────────────────────────────────────

  pub fn pre_get_avatar_url(
    &self,
    subject: &AvatarSubject,
    options: &mut ProcessedOptions,
  ) -> Option<HookValue> {
    let hook = self.pre_get_avatar_url.as_ref()?;
    hook(subject, options)
  }

  pub fn get_avatar_url(
    &self,
    url: HookValue,
    subject: &AvatarSubject,
    options: &mut ProcessedOptions,
  ) -> HookValue {
    match &self.get_avatar_url {
      Some(f) => f(url, subject, options),
      None => url,
    }
  }

  pub fn pre_get_avatar(
    &self,
    subject: &AvatarSubject,
    options: &AvatarOptions,
  ) -> Option<HookValue> {
    let hook = self.pre_get_avatar.as_ref()?;
    hook(subject, options)
  }

  pub fn get_avatar(
    &self,
    html: HookValue,
    subject: &AvatarSubject,
    options: &AvatarOptions,
  ) -> HookValue {
    match &self.get_avatar {
      Some(f) => f(html, subject, options),
      None => html,
    }
  }

  /// Apply the comment-type filter to `base`.
  pub fn comment_types(&self, base: Vec<String>) -> Vec<String> {
    match &self.comment_types {
      Some(f) => f(base),
      None => base,
    }
  }

}

impl fmt::Debug for Hooks {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Hooks")
      .field("pre_get_avatar_url", &self.pre_get_avatar_url.is_some())
      .field("get_avatar_url", &self.get_avatar_url.is_some())
      .field("pre_get_avatar", &self.pre_get_avatar.is_some())
      .field("get_avatar", &self.get_avatar.is_some())
      .field("comment_types", &self.comment_types.is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn empty_hooks_pass_values_through() {
    let hooks = Hooks::new();
    let subject = AvatarSubject::UserId(1);
    let options = AvatarOptions::default();
    assert!(hooks.pre_get_avatar(&subject, &options).is_none());
    assert_eq!(hooks.get_avatar(json!("x"), &subject, &options), json!("x"));
    assert_eq!(hooks.comment_types(vec!["comment".into()]), vec!["comment"]);
  }

  #[test]
  fn comment_type_filter_extends_defaults() {
    let hooks = Hooks::new().on_comment_types(|mut types| {
      types.push("allowed".into());
      types
    });
    assert_eq!(
      hooks.comment_types(vec!["comment".into()]),
      vec!["comment", "allowed"]
    );
  }
}
