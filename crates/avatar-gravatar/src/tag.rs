//! `<img>` tag rendering on top of [`get_avatar_url`].

use avatar_core::{
  HookValue, HostServices, Suppressed,
  options::{AvatarOptions, ProcessedOptions},
  subject::AvatarSubject,
};
use tracing::debug;

use crate::{
  escape::{escape_attr, escape_url},
  url::{ResolvedUrl, get_avatar_url},
};

/// Render the avatar `<img>` tag for `subject`.
///
/// Suppressed when avatars are switched off for the site (unless
/// `force_display` is set), when URL resolution is suppressed, or when a URL
/// hook left something other than a non-empty string.
pub fn get_avatar<H>(
  subject: &AvatarSubject,
  options: &AvatarOptions,
  host: &H,
) -> Result<HookValue, Suppressed>
where
  H: HostServices + ?Sized,
{
  if let Some(avatar) = host.pre_get_avatar(subject, options) {
    debug!("avatar tag supplied by pre_get_avatar hook");
    return Ok(host.get_avatar_filter(avatar, subject, options));
  }

  if !options.force_display && !host.show_avatars() {
    debug!("avatars hidden by site option");
    return Err(Suppressed::AvatarsHidden);
  }

  let ResolvedUrl {
    url,
    options: processed,
  } = get_avatar_url(subject, options, host)?;

  let url = match url {
    HookValue::String(url) if !url.is_empty() => url,
    other => {
      debug!(url = %other, "avatar url unusable; no tag rendered");
      return Err(Suppressed::NoUrl);
    }
  };

  let html = format!(
    r#"<img alt="{alt}" src="{src}" class="{class}" height="{size}" width="{size}" />"#,
    alt = escape_attr(&processed.alt),
    src = escape_url(&url),
    class = escape_attr(&classes(&processed).join(" ")),
    size = processed.size,
  );

  Ok(host.get_avatar_filter(HookValue::String(html), subject, options))
}

/// `avatar avatar-{size} photo [avatar-default] {caller classes…}`
fn classes(options: &ProcessedOptions) -> Vec<String> {
  let mut classes = vec![
    "avatar".to_string(),
    format!("avatar-{}", options.size),
    "photo".to_string(),
  ];
  if !options.found_avatar || options.force_default {
    classes.push("avatar-default".to_string());
  }
  classes.extend(options.class.iter().cloned());
  classes
}
