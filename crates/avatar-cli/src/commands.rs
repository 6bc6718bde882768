//! Subcommand implementations.

use std::sync::Arc;

use anyhow::{Context as _, bail};
use avatar_core::{
  HookValue,
  options::{AvatarOptions, AvatarSize, ClassList},
  subject::AvatarSubject,
};
use avatar_gravatar::{get_avatar, get_avatar_url};
use avatar_store_sqlite::SqliteHost;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{SubjectArgs, TagArgs, UrlArgs, settings::AppConfig};

// ─── Resolution ───────────────────────────────────────────────────────────────

pub fn url(
  host: &SqliteHost,
  subject: &SubjectArgs,
  args: &UrlArgs,
  json: bool,
) -> anyhow::Result<()> {
  let subject = resolve_subject(host, subject)?;
  let options = url_options(args);
  let resolved = get_avatar_url(&subject, &options, host)
    .context("no avatar URL for this subject")?;

  if json {
    println!("{}", serde_json::to_string_pretty(&resolved)?);
  } else {
    print_value(&resolved.url);
  }
  Ok(())
}

pub fn img(
  host: &SqliteHost,
  subject: &SubjectArgs,
  args: &UrlArgs,
  tag: &TagArgs,
) -> anyhow::Result<()> {
  let subject = resolve_subject(host, subject)?;
  let options = AvatarOptions {
    alt: tag.alt.clone(),
    class: ClassList::from(tag.class.clone()),
    force_display: tag.force_display,
    ..url_options(args)
  };
  let html =
    get_avatar(&subject, &options, host).context("no avatar for this subject")?;
  print_value(&html);
  Ok(())
}

fn url_options(args: &UrlArgs) -> AvatarOptions {
  AvatarOptions {
    size: args.size.clone().map(AvatarSize::Text).unwrap_or_default(),
    default_image: args.default.clone(),
    force_default: args.force_default,
    rating: args.rating.clone(),
    scheme: args.scheme.clone(),
    ..AvatarOptions::default()
  }
}

/// Turn `--id`, `--post` or `--comment` into a subject. Stored records are
/// looked up here so a missing id is an error rather than a silent default.
fn resolve_subject(
  host: &SqliteHost,
  args: &SubjectArgs,
) -> anyhow::Result<AvatarSubject> {
  if let Some(id) = &args.id {
    return Ok(AvatarSubject::from_identifier(id));
  }
  if let Some(id) = args.post {
    let post = host
      .get_post(id)?
      .with_context(|| format!("post {id} not found"))?;
    return Ok(AvatarSubject::Post(post));
  }
  if let Some(id) = args.comment {
    let comment = host
      .get_comment(id)?
      .with_context(|| format!("comment {id} not found"))?;
    return Ok(AvatarSubject::Comment(comment));
  }
  bail!("one of --id, --post or --comment is required")
}

/// Strings print bare; anything a hook substituted prints as JSON.
fn print_value(value: &HookValue) {
  match value {
    HookValue::String(s) => println!("{s}"),
    other => println!("{other}"),
  }
}

// ─── Records ──────────────────────────────────────────────────────────────────

pub fn add_user(host: &SqliteHost, login: &str, email: &str) -> anyhow::Result<()> {
  let user = host
    .add_user(login, email)
    .with_context(|| format!("failed to add user {login:?}"))?;
  println!("{}", user.id);
  Ok(())
}

pub fn delete_user(host: &SqliteHost, id: u64) -> anyhow::Result<()> {
  host
    .delete_user(id)
    .with_context(|| format!("failed to delete user {id}"))?;
  tracing::info!(id, "user deleted");
  Ok(())
}

pub fn add_post(host: &SqliteHost, author: u64) -> anyhow::Result<()> {
  if host.get_user(author)?.is_none() {
    bail!("user {author} not found");
  }
  let post = host.add_post(author)?;
  println!("{}", post.id);
  Ok(())
}

pub fn add_comment(
  host: &SqliteHost,
  user: Option<u64>,
  email: Option<&str>,
  kind: Option<&str>,
) -> anyhow::Result<()> {
  if user.is_none() && email.is_none() {
    bail!("a comment needs --user or --email");
  }
  let comment = host.add_comment(user, email, kind)?;
  println!("{}", comment.id);
  Ok(())
}

// ─── Server ───────────────────────────────────────────────────────────────────

pub async fn serve(host: SqliteHost, config: &AppConfig) -> anyhow::Result<()> {
  let app = avatar_api::avatar_router(Arc::new(host))
    .layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", config.host, config.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
