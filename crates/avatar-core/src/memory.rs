//! [`MemoryHost`] — an in-process [`HostServices`] holding users in a map.
//!
//! Useful for embedding in tests and for callers whose records already live
//! in memory.

use std::collections::HashMap;

use crate::{
  hooks::Hooks,
  host::{HookValue, HostServices, SiteOptions},
  options::{AvatarOptions, ProcessedOptions},
  subject::{AvatarSubject, UserRecord},
};

#[derive(Debug, Default)]
pub struct MemoryHost {
  users:   HashMap<u64, UserRecord>,
  last_id: u64,
  pub site:  SiteOptions,
  pub hooks: Hooks,
  /// Reported by [`HostServices::is_ssl`].
  pub ssl:   bool,
}

impl MemoryHost {
  pub fn new(site: SiteOptions) -> Self {
    Self {
      site,
      ..Self::default()
    }
  }

  /// Register a user and return the stored record.
  pub fn add_user(&mut self, login: &str, email: &str) -> UserRecord {
    self.last_id += 1;
    let id = self.last_id;
    let user = UserRecord {
      id,
      login: login.to_string(),
      email: email.to_string(),
    };
    self.users.insert(id, user.clone());
    user
  }

  /// Remove a user; comments and posts referencing it keep their ids.
  pub fn delete_user(&mut self, id: u64) -> Option<UserRecord> {
    self.users.remove(&id)
  }

  pub fn with_hooks(mut self, hooks: Hooks) -> Self {
    self.hooks = hooks;
    self
  }
}

impl HostServices for MemoryHost {
  fn get_user_by_id(&self, id: u64) -> Option<UserRecord> {
    self.users.get(&id).cloned()
  }

  fn allowed_comment_types(&self) -> Vec<String> {
    self.hooks.comment_types(self.site.comment_types.clone())
  }

  fn show_avatars(&self) -> bool { self.site.show_avatars }

  fn default_avatar_option(&self) -> String { self.site.avatar_default.clone() }

  fn avatar_rating_option(&self) -> String { self.site.avatar_rating.clone() }

  fn is_ssl(&self) -> bool { self.ssl }

  fn pre_get_avatar_url(
    &self,
    subject: &AvatarSubject,
    options: &mut ProcessedOptions,
  ) -> Option<HookValue> {
    self.hooks.pre_get_avatar_url(subject, options)
  }

  fn get_avatar_url_filter(
    &self,
    url: HookValue,
    subject: &AvatarSubject,
    options: &mut ProcessedOptions,
  ) -> HookValue {
    self.hooks.get_avatar_url(url, subject, options)
  }

  fn pre_get_avatar(
    &self,
    subject: &AvatarSubject,
    options: &AvatarOptions,
  ) -> Option<HookValue> {
    self.hooks.pre_get_avatar(subject, options)
  }

  fn get_avatar_filter(
    &self,
    html: HookValue,
    subject: &AvatarSubject,
    options: &AvatarOptions,
  ) -> HookValue {
    self.hooks.get_avatar(html, subject, options)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn users_get_sequential_ids() {
    let mut host = MemoryHost::default();
    let a = host.add_user("a", "a@example.org");
    let b = host.add_user("b", "b@example.org");
    assert_eq!((a.id, b.id), (1, 2));
    assert_eq!(host.get_user_by_id(2), Some(b));
  }

  #[test]
  fn deleted_users_are_not_found() {
    let mut host = MemoryHost::default();
    let user = host.add_user("gone", "gone@example.org");
    assert!(host.delete_user(user.id).is_some());
    assert!(host.get_user_by_id(user.id).is_none());
  }

  #[test]
  fn ids_are_not_reused_after_delete() {
    let mut host = MemoryHost::default();
    let a = host.add_user("a", "a@example.org");
    host.delete_user(a.id);
    let b = host.add_user("b", "b@example.org");
    assert_ne!(a.id, b.id);
  }

  #[test]
  fn site_options_back_the_defaults() {
    let host = MemoryHost::new(SiteOptions {
      show_avatars: false,
      avatar_rating: "PG".into(),
      ..SiteOptions::default()
    });
    assert!(!host.show_avatars());
    assert_eq!(host.avatar_rating_option(), "PG");
    assert_eq!(host.default_avatar_option(), "mystery");
    assert_eq!(host.allowed_comment_types(), vec!["comment"]);
  }
}
