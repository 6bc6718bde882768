//! `avatar` — resolve avatar URLs and tags from the command line.
//!
//! # Usage
//!
//! ```text
//! avatar add-user --login alice --email alice@example.org
//! avatar url --id 1 --size 128
//! avatar img --id alice@example.org --alt Alice --class round
//! avatar serve --config ~/.config/avatar/config.toml
//! ```

mod commands;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use avatar_store_sqlite::SqliteHost;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::AppConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "avatar", author, version, about = "Avatar URL and tag resolver")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the avatar URL for a subject.
  Url {
    #[command(flatten)]
    subject: SubjectArgs,
    #[command(flatten)]
    options: UrlArgs,
    /// Print the URL together with the processed options as JSON.
    #[arg(long)]
    json:    bool,
  },
  /// Print the avatar `<img>` tag for a subject.
  Img {
    #[command(flatten)]
    subject: SubjectArgs,
    #[command(flatten)]
    options: UrlArgs,
    #[command(flatten)]
    tag:     TagArgs,
  },
  /// Register a user.
  AddUser {
    #[arg(long)]
    login: String,
    #[arg(long)]
    email: String,
  },
  /// Delete a user, keeping their posts and comments.
  DeleteUser { id: u64 },
  /// Record a post by an existing user.
  AddPost {
    #[arg(long)]
    author: u64,
  },
  /// Record a comment by a user or a guest.
  AddComment {
    #[arg(long)]
    user:  Option<u64>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long = "type")]
    kind:  Option<String>,
  },
  /// Serve the HTTP API.
  Serve,
}

/// Exactly one way of naming the subject.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SubjectArgs {
  /// User id, email address, or `{hash}@md5.gravatar.com`.
  #[arg(long)]
  id:      Option<String>,
  /// Id of a stored post; its author's avatar is used.
  #[arg(long)]
  post:    Option<u64>,
  /// Id of a stored comment.
  #[arg(long)]
  comment: Option<u64>,
}

#[derive(Args)]
struct UrlArgs {
  /// Edge length in pixels.
  #[arg(long)]
  size:          Option<String>,
  /// Default image token (mm, 404, identicon, …) or URL.
  #[arg(long)]
  default:       Option<String>,
  #[arg(long)]
  force_default: bool,
  /// Maximum rating: g, pg, r or x.
  #[arg(long)]
  rating:        Option<String>,
  /// http, https or relative.
  #[arg(long)]
  scheme:        Option<String>,
}

#[derive(Args)]
struct TagArgs {
  #[arg(long, default_value = "")]
  alt:           String,
  /// Extra CSS class; may be repeated.
  #[arg(long)]
  class:         Vec<String>,
  /// Render even if avatars are disabled for the site.
  #[arg(long)]
  force_display: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = AppConfig::load(&cli.config)?;

  let store_path = expand_tilde(&config.store_path);
  let host = SqliteHost::open(&store_path, config.site.clone())
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Url {
      subject,
      options,
      json,
    } => commands::url(&host, &subject, &options, json),
    Command::Img {
      subject,
      options,
      tag,
    } => commands::img(&host, &subject, &options, &tag),
    Command::AddUser { login, email } => commands::add_user(&host, &login, &email),
    Command::DeleteUser { id } => commands::delete_user(&host, id),
    Command::AddPost { author } => commands::add_post(&host, author),
    Command::AddComment { user, email, kind } => {
      commands::add_comment(&host, user, email.as_deref(), kind.as_deref())
    }
    Command::Serve => commands::serve(host, &config).await,
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
