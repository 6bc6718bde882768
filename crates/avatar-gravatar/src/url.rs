//! URL resolution: subject → email → hash → avatar URL.

use avatar_core::{
  HookValue, HostServices, Suppressed,
  options::{AvatarOptions, ProcessedOptions},
  subject::{AvatarSubject, CommentRecord},
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
  hash::{email_hash, shard},
  normalize::process_options,
};

/// The outcome of a successful [`get_avatar_url`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedUrl {
  /// The URL, or whatever value a hook replaced it with.
  pub url:     HookValue,
  /// The normalized options, annotated with `found_avatar`.
  pub options: ProcessedOptions,
}

/// Resolve the avatar URL for `subject`.
///
/// Returns [`Suppressed::CommentType`] when `subject` is a comment whose type
/// the host does not allow. Every other input yields a URL, falling back to
/// the default image when no email can be found.
pub fn get_avatar_url<H>(
  subject: &AvatarSubject,
  options: &AvatarOptions,
  host: &H,
) -> Result<ResolvedUrl, Suppressed>
where
  H: HostServices + ?Sized,
{
  let mut processed = process_options(options, host);

  if let Some(url) = host.pre_get_avatar_url(subject, &mut processed) {
    debug!("avatar url supplied by pre_get_avatar_url hook");
    let url = host.get_avatar_url_filter(url, subject, &mut processed);
    return Ok(ResolvedUrl {
      url,
      options: processed,
    });
  }

  let hash = resolve_hash(subject, host)?;
  processed.found_avatar = !hash.is_empty();

  let url = build_url(&hash, &processed, host.is_ssl());
  trace!(%url, found = processed.found_avatar, "resolved avatar url");

  let url =
    host.get_avatar_url_filter(HookValue::String(url), subject, &mut processed);
  Ok(ResolvedUrl {
    url,
    options: processed,
  })
}

/// Find the email hash for `subject`; empty when none can be found.
fn resolve_hash<H>(subject: &AvatarSubject, host: &H) -> Result<String, Suppressed>
where
  H: HostServices + ?Sized,
{
  let email = match subject {
    AvatarSubject::Hash(hash) => return Ok(hash.clone()),
    AvatarSubject::UserId(id) => user_email(host, id.unsigned_abs()),
    AvatarSubject::Email(email) => Some(email.clone()),
    AvatarSubject::User(user) => Some(user.email.clone()),
    AvatarSubject::Post(post) => user_email(host, post.author_id),
    AvatarSubject::Comment(comment) => comment_email(comment, host)?,
  };

  Ok(
    email
      .filter(|e| !e.is_empty())
      .map(|e| email_hash(&e))
      .unwrap_or_default(),
  )
}

fn user_email<H>(host: &H, id: u64) -> Option<String>
where
  H: HostServices + ?Sized,
{
  if id == 0 {
    return None;
  }
  host.get_user_by_id(id).map(|user| user.email)
}

/// The registered author's email, or the email stored with the comment when
/// the author is a guest or no longer exists.
fn comment_email<H>(
  comment: &CommentRecord,
  host: &H,
) -> Result<Option<String>, Suppressed>
where
  H: HostServices + ?Sized,
{
  if let Some(kind) = comment.comment_type.as_deref().filter(|t| !t.is_empty())
    && !host.allowed_comment_types().iter().any(|allowed| allowed == kind)
  {
    debug!(comment_id = comment.id, kind, "no avatar for comment type");
    return Err(Suppressed::CommentType(kind.to_string()));
  }

  let email = comment
    .user_id
    .and_then(|id| user_email(host, id))
    .or_else(|| comment.author_email.clone().filter(|e| !e.is_empty()));
  Ok(email)
}

/// Assemble `{scheme}://{shard}.gravatar.com/avatar/{hash}?{query}`.
fn build_url(hash: &str, options: &ProcessedOptions, ssl: bool) -> String {
  let mut params: Vec<(&str, &str)> = Vec::with_capacity(4);
  let size = options.size.to_string();
  params.push(("s", size.as_str()));
  if let Some(default) = options.default_image.as_deref() {
    params.push(("d", default));
  }
  if options.force_default {
    params.push(("f", "y"));
  }
  if !options.rating.is_empty() {
    params.push(("r", options.rating.as_str()));
  }

  let query = params
    .iter()
    .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
    .collect::<Vec<_>>()
    .join("&");

  format!(
    "{}//{}.gravatar.com/avatar/{hash}?{query}",
    scheme_prefix(options.scheme.as_deref(), ssl),
    shard(hash),
  )
}

/// `"http:"`, `"https:"`, or `""` for a scheme-relative URL.
fn scheme_prefix(scheme: Option<&str>, ssl: bool) -> &'static str {
  match scheme {
    Some("http") => "http:",
    Some("https") => "https:",
    Some("relative") => "",
    _ if ssl => "https:",
    _ => "http:",
  }
}
