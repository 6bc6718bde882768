//! HTTP API for avatar resolution.
//!
//! Exposes an axum [`Router`] backed by any [`HostServices`]. TLS and
//! transport concerns are the caller's responsibility; a TLS-terminating
//! proxy should set `X-Forwarded-Proto` so default URLs use `https`.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", avatar_api::avatar_router(host.clone()))
//! ```

pub mod avatar;
pub mod error;
pub mod scope;

use std::sync::Arc;

use avatar_core::HostServices;
use axum::{Router, routing::get};

pub use error::ApiError;

/// Build the avatar router for `host`.
pub fn avatar_router<H>(host: Arc<H>) -> Router<()>
where
  H: HostServices + Send + Sync + 'static,
{
  Router::new()
    .route("/avatar/url", get(avatar::url::<H>))
    .route("/avatar/img", get(avatar::img::<H>))
    .with_state(host)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use avatar_core::{SiteOptions, hooks::Hooks};
  use avatar_store_sqlite::SqliteHost;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  const USER_EMAIL: &str = "UsEr@exaMple.oRg";
  const USER_EMAIL_MD5: &str = "572c3489ea700045927076136a969e27";

  fn make_host(site: SiteOptions) -> (Arc<SqliteHost>, u64) {
    let host = SqliteHost::open_in_memory(site).unwrap();
    let user = host.add_user("user", USER_EMAIL).unwrap();
    (Arc::new(host), user.id)
  }

  async fn get_raw(
    host: Arc<SqliteHost>,
    uri: &str,
    headers: Vec<(&str, &str)>,
  ) -> (StatusCode, Option<String>, String) {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::empty()).unwrap();
    let resp = avatar_router(host).oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(str::to_string);
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
  }

  #[tokio::test]
  async fn url_endpoint_returns_url_and_options() {
    let (host, id) = make_host(SiteOptions::default());
    let (status, _, body) =
      get_raw(host, &format!("/avatar/url?id={id}"), vec![]).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
      body["url"],
      json!(format!("http://2.gravatar.com/avatar/{USER_EMAIL_MD5}?s=96&d=mm"))
    );
    assert_eq!(body["options"]["found_avatar"], json!(true));
    assert_eq!(body["options"]["size"], json!(96));
  }

  #[tokio::test]
  async fn url_endpoint_honours_forwarded_proto() {
    let (host, id) = make_host(SiteOptions::default());
    let (_, _, body) = get_raw(
      host,
      &format!("/avatar/url?id={id}&size=-48&rating=PG"),
      vec![("x-forwarded-proto", "https")],
    )
    .await;
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
      body["url"],
      json!(format!(
        "https://2.gravatar.com/avatar/{USER_EMAIL_MD5}?s=48&d=mm&r=pg"
      ))
    );
  }

  #[tokio::test]
  async fn missing_id_is_bad_request() {
    let (host, _) = make_host(SiteOptions::default());
    let (status, _, _) = get_raw(host, "/avatar/url", vec![]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn img_endpoint_serves_html() {
    let (host, id) = make_host(SiteOptions::default());
    let (status, content_type, body) = get_raw(
      host,
      &format!("/avatar/img?id={id}&alt=Me&class=round%20small"),
      vec![],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert_eq!(
      body,
      format!(
        r#"<img alt="Me" src="http://2.gravatar.com/avatar/{USER_EMAIL_MD5}?s=96&#038;d=mm" class="avatar avatar-96 photo round small" height="96" width="96" />"#
      )
    );
  }

  #[tokio::test]
  async fn hidden_avatars_are_not_found_unless_forced() {
    let (host, id) = make_host(SiteOptions {
      show_avatars: false,
      ..SiteOptions::default()
    });
    let (status, _, body) =
      get_raw(host.clone(), &format!("/avatar/img?id={id}"), vec![]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("disabled"));

    let (status, _, _) = get_raw(
      host,
      &format!("/avatar/img?id={id}&force_display=true"),
      vec![],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }

  #[tokio::test]
  async fn hook_sentinels_are_served_as_json() {
    let host = SqliteHost::open_in_memory(SiteOptions::default())
      .unwrap()
      .with_hooks(Hooks::new().on_pre_get_avatar(|_, _| Some(json!(0))));
    let (status, _, body) =
      get_raw(Arc::new(host), "/avatar/img?id=user@example.org", vec![]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "0");
  }
}
