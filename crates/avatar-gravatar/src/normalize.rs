//! Turning caller options into [`ProcessedOptions`].

use avatar_core::{
  HostServices,
  options::{AvatarOptions, ProcessedOptions, normalize_default_image},
};

/// Normalize `options`, filling gaps from the host's site options.
///
/// The result always satisfies the [`ProcessedOptions`] invariants and has
/// `found_avatar` cleared.
pub fn process_options<H>(options: &AvatarOptions, host: &H) -> ProcessedOptions
where
  H: HostServices + ?Sized,
{
  let default_image = options
    .default_image
    .clone()
    .unwrap_or_else(|| host.default_avatar_option());
  let rating = options
    .rating
    .clone()
    .unwrap_or_else(|| host.avatar_rating_option());

  ProcessedOptions {
    size:          options.size.normalize(),
    default_image: normalize_default_image(&default_image),
    force_default: options.force_default,
    rating:        rating.to_lowercase(),
    scheme:        options.scheme.clone(),
    alt:           options.alt.clone(),
    class:         options.class.tokens(),
    force_display: options.force_display,
    found_avatar:  false,
  }
}

#[cfg(test)]
mod tests {
  use avatar_core::{MemoryHost, SiteOptions, options::AvatarSize};

  use super::*;

  #[test]
  fn defaults_come_from_the_site() {
    let host = MemoryHost::new(SiteOptions {
      avatar_default: "404".into(),
      avatar_rating: "PG".into(),
      ..SiteOptions::default()
    });
    let processed = process_options(&AvatarOptions::default(), &host);
    assert_eq!(processed.size, 96);
    assert_eq!(processed.default_image.as_deref(), Some("404"));
    assert_eq!(processed.rating, "pg");
    assert!(!processed.found_avatar);
  }

  #[test]
  fn caller_values_win_over_site_options() {
    let host = MemoryHost::new(SiteOptions {
      avatar_rating: "X".into(),
      ..SiteOptions::default()
    });
    let options = AvatarOptions {
      size: AvatarSize::Number(-40),
      default_image: Some("gravatar_default".into()),
      rating: Some("G".into()),
      ..AvatarOptions::default()
    };
    let processed = process_options(&options, &host);
    assert_eq!(processed.size, 40);
    assert_eq!(processed.default_image, None);
    assert_eq!(processed.rating, "g");
  }

  #[test]
  fn empty_site_default_is_mystery() {
    let host = MemoryHost::new(SiteOptions {
      avatar_default: String::new(),
      ..SiteOptions::default()
    });
    let processed = process_options(&AvatarOptions::default(), &host);
    assert_eq!(processed.default_image.as_deref(), Some("mm"));
  }
}
