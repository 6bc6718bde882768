//! Per-request view of a shared host.
//!
//! The shared host knows nothing about the request being served, so
//! [`RequestHost`] layers the one request-scoped fact resolution cares about
//! (whether the client connection is encrypted) on top of it.

use avatar_core::{
  HookValue, HostServices,
  options::{AvatarOptions, ProcessedOptions},
  subject::{AvatarSubject, UserRecord},
};
use axum::http::HeaderMap;

/// Header set by TLS-terminating proxies.
pub const FORWARDED_PROTO: &str = "x-forwarded-proto";

pub struct RequestHost<'a, H: ?Sized> {
  inner: &'a H,
  ssl:   bool,
}

impl<'a, H: HostServices + ?Sized> RequestHost<'a, H> {
  pub fn new(inner: &'a H, headers: &HeaderMap) -> Self {
    let ssl = headers
      .get(FORWARDED_PROTO)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.split(',').next())
      .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"));
    Self {
      ssl: ssl || inner.is_ssl(),
      inner,
    }
  }
}

impl<H: HostServices + ?Sized> HostServices for RequestHost<'_, H> {
  fn get_user_by_id(&self, id: u64) -> Option<UserRecord> {
    self.inner.get_user_by_id(id)
  }

  fn allowed_comment_types(&self) -> Vec<String> {
    self.inner.allowed_comment_types()
  }

  fn show_avatars(&self) -> bool { self.inner.show_avatars() }

  fn default_avatar_option(&self) -> String { self.inner.default_avatar_option() }

  fn avatar_rating_option(&self) -> String { self.inner.avatar_rating_option() }

  fn is_ssl(&self) -> bool { self.ssl }

  fn pre_get_avatar_url(
    &self,
    subject: &AvatarSubject,
    options: &mut ProcessedOptions,
  ) -> Option<HookValue> {
    self.inner.pre_get_avatar_url(subject, options)
  }

  fn get_avatar_url_filter(
    &self,
    url: HookValue,
    subject: &AvatarSubject,
    options: &mut ProcessedOptions,
  ) -> HookValue {
    self.inner.get_avatar_url_filter(url, subject, options)
  }

  fn pre_get_avatar(
    &self,
    subject: &AvatarSubject,
    options: &AvatarOptions,
  ) -> Option<HookValue> {
    self.inner.pre_get_avatar(subject, options)
  }

  fn get_avatar_filter(
    &self,
    html: HookValue,
    subject: &AvatarSubject,
    options: &AvatarOptions,
  ) -> HookValue {
    self.inner.get_avatar_filter(html, subject, options)
  }
}
