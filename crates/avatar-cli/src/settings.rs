//! Runtime configuration, read from `config.toml` and `AVATAR_*` variables.
//!
//! ```toml
//! store_path = "avatars.db"
//! host = "127.0.0.1"
//! port = 8080
//!
//! [site]
//! show_avatars = true
//! avatar_default = "identicon"
//! avatar_rating = "PG"
//! comment_types = ["comment", "review"]
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `AVATAR_SITE__SHOW_AVATARS=false`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use avatar_core::SiteOptions;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub store_path: PathBuf,
  pub host:       String,
  pub port:       u16,
  pub site:       SiteOptions,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("avatars.db"),
      host:       "127.0.0.1".to_string(),
      port:       8080,
      site:       SiteOptions::default(),
    }
  }
}

impl AppConfig {
  /// Load from `path` (optional) layered under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("AVATAR")
          .separator("__")
          .list_separator(",")
          .with_list_parse_key("site.comment_types")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }
}
