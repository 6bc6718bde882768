//! Handlers for `/avatar` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/avatar/url` | `?id=<user id\|email\|hash>` plus URL options; JSON |
//! | `GET`  | `/avatar/img` | as above plus `alt`, `class`, `force_display`; HTML |
//!
//! Suppressed avatars answer `404`.

use std::sync::Arc;

use avatar_core::{
  HostServices,
  options::{AvatarOptions, AvatarSize, ClassList},
  subject::AvatarSubject,
};
use avatar_gravatar::{ResolvedUrl, get_avatar, get_avatar_url};
use axum::{
  Json,
  extract::{Query, State},
  http::HeaderMap,
  response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{error::ApiError, scope::RequestHost};

// ─── Parameters ───────────────────────────────────────────────────────────────

/// Query parameters shared by both endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AvatarParams {
  /// User id, email address, or `{hash}@md5.gravatar.com`.
  pub id:            Option<String>,
  pub size:          Option<String>,
  pub default:       Option<String>,
  #[serde(default)]
  pub force_default: bool,
  pub rating:        Option<String>,
  pub scheme:        Option<String>,
  #[serde(default)]
  pub alt:           String,
  /// Whitespace-delimited extra classes.
  pub class:         Option<String>,
  #[serde(default)]
  pub force_display: bool,
}

impl AvatarParams {
  fn into_request(self) -> Result<(AvatarSubject, AvatarOptions), ApiError> {
    let id = self
      .id
      .filter(|id| !id.trim().is_empty())
      .ok_or_else(|| ApiError::BadRequest("missing `id` parameter".into()))?;

    let options = AvatarOptions {
      size:          self.size.map(AvatarSize::Text).unwrap_or_default(),
      default_image: self.default,
      force_default: self.force_default,
      rating:        self.rating,
      scheme:        self.scheme,
      alt:           self.alt,
      class:         self.class.map(ClassList::One).unwrap_or_default(),
      force_display: self.force_display,
    };
    Ok((AvatarSubject::from_identifier(&id), options))
  }
}

// ─── URL ──────────────────────────────────────────────────────────────────────

/// `GET /avatar/url?id=…`
pub async fn url<H>(
  State(host): State<Arc<H>>,
  headers: HeaderMap,
  Query(params): Query<AvatarParams>,
) -> Result<Json<ResolvedUrl>, ApiError>
where
  H: HostServices + Send + Sync + 'static,
{
  let (subject, options) = params.into_request()?;
  let host = RequestHost::new(host.as_ref(), &headers);
  let resolved = get_avatar_url(&subject, &options, &host)?;
  Ok(Json(resolved))
}

// ─── Tag ──────────────────────────────────────────────────────────────────────

/// `GET /avatar/img?id=…`
///
/// String results are served as HTML; anything a hook substituted is served
/// as JSON so it survives unchanged.
pub async fn img<H>(
  State(host): State<Arc<H>>,
  headers: HeaderMap,
  Query(params): Query<AvatarParams>,
) -> Result<Response, ApiError>
where
  H: HostServices + Send + Sync + 'static,
{
  let (subject, options) = params.into_request()?;
  let host = RequestHost::new(host.as_ref(), &headers);
  let avatar = get_avatar(&subject, &options, &host)?;
  Ok(match avatar {
    serde_json::Value::String(html) => Html(html).into_response(),
    other => Json(other).into_response(),
  })
}
