//! [`SqliteHost`] — the SQLite implementation of [`HostServices`].

use std::{
  path::Path,
  sync::{Mutex, MutexGuard},
};

use avatar_core::{
  HookValue, HostServices, SiteOptions,
  hooks::Hooks,
  options::{AvatarOptions, ProcessedOptions},
  subject::{AvatarSubject, CommentRecord, PostRecord, UserRecord},
};
use rusqlite::{Connection, OptionalExtension as _, Row, params};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An avatar host whose records live in a single SQLite file.
pub struct SqliteHost {
  conn:  Mutex<Connection>,
  site:  SiteOptions,
  hooks: Hooks,
}

impl SqliteHost {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>, site: SiteOptions) -> Result<Self> {
    Self::init(Connection::open(path)?, site)
  }

  /// Open an in-memory store, for tests and throwaway hosts.
  pub fn open_in_memory(site: SiteOptions) -> Result<Self> {
    Self::init(Connection::open_in_memory()?, site)
  }

  fn init(conn: Connection, site: SiteOptions) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self {
      conn: Mutex::new(conn),
      site,
      hooks: Hooks::default(),
    })
  }

  /// Replace the installed hooks.
  pub fn with_hooks(mut self, hooks: Hooks) -> Self {
    self.hooks = hooks;
    self
  }

  pub fn site(&self) -> &SiteOptions { &self.site }

  fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|_| Error::Poisoned)
  }

  // ── Users ─────────────────────────────────────────────────────────────

  pub fn add_user(&self, login: &str, email: &str) -> Result<UserRecord> {
    let conn = self.conn()?;
    conn.execute(
      "INSERT INTO users (login, email) VALUES (?1, ?2)",
      params![login, email],
    )?;
    Ok(UserRecord {
      id:    conn.last_insert_rowid() as u64,
      login: login.to_string(),
      email: email.to_string(),
    })
  }

  pub fn get_user(&self, id: u64) -> Result<Option<UserRecord>> {
    let Some(id) = sql_id(id) else {
      return Ok(None);
    };
    let user = self
      .conn()?
      .query_row(
        "SELECT id, login, email FROM users WHERE id = ?1",
        params![id],
        decode_user,
      )
      .optional()?;
    Ok(user)
  }

  /// Delete a user. Their posts and comments are kept.
  pub fn delete_user(&self, id: u64) -> Result<()> {
    let deleted = match sql_id(id) {
      Some(sql) => self
        .conn()?
        .execute("DELETE FROM users WHERE id = ?1", params![sql])?,
      None => 0,
    };
    if deleted == 0 {
      return Err(Error::UserNotFound(id));
    }
    Ok(())
  }

  // ── Posts ─────────────────────────────────────────────────────────────

  pub fn add_post(&self, author_id: u64) -> Result<PostRecord> {
    let conn = self.conn()?;
    conn.execute(
      "INSERT INTO posts (author_id) VALUES (?1)",
      params![author_id as i64],
    )?;
    Ok(PostRecord {
      id: conn.last_insert_rowid() as u64,
      author_id,
    })
  }

  pub fn get_post(&self, id: u64) -> Result<Option<PostRecord>> {
    let Some(id) = sql_id(id) else {
      return Ok(None);
    };
    let post = self
      .conn()?
      .query_row(
        "SELECT id, author_id FROM posts WHERE id = ?1",
        params![id],
        |row| {
          Ok(PostRecord {
            id:        row.get::<_, i64>(0)? as u64,
            author_id: row.get::<_, i64>(1)? as u64,
          })
        },
      )
      .optional()?;
    Ok(post)
  }

  // ── Comments ──────────────────────────────────────────────────────────

  pub fn add_comment(
    &self,
    user_id: Option<u64>,
    author_email: Option<&str>,
    comment_type: Option<&str>,
  ) -> Result<CommentRecord> {
    let conn = self.conn()?;
    conn.execute(
      "INSERT INTO comments (user_id, author_email, comment_type)
       VALUES (?1, ?2, ?3)",
      params![user_id.map(|id| id as i64), author_email, comment_type],
    )?;
    Ok(CommentRecord {
      id:           conn.last_insert_rowid() as u64,
      user_id,
      author_email: author_email.map(str::to_string),
      comment_type: comment_type.map(str::to_string),
    })
  }

  pub fn get_comment(&self, id: u64) -> Result<Option<CommentRecord>> {
    let Some(id) = sql_id(id) else {
      return Ok(None);
    };
    let comment = self
      .conn()?
      .query_row(
        "SELECT id, user_id, author_email, comment_type
           FROM comments WHERE id = ?1",
        params![id],
        |row| {
          Ok(CommentRecord {
            id:           row.get::<_, i64>(0)? as u64,
            user_id:      row.get::<_, Option<i64>>(1)?.map(|id| id as u64),
            author_email: row.get(2)?,
            comment_type: row.get(3)?,
          })
        },
      )
      .optional()?;
    Ok(comment)
  }
}

// ─── HostServices ────────────────────────────────────────────────────────────

impl HostServices for SqliteHost {
  fn get_user_by_id(&self, id: u64) -> Option<UserRecord> {
    match self.get_user(id) {
      Ok(user) => user,
      Err(e) => {
        tracing::warn!(user_id = id, error = %e, "user lookup failed");
        None
      }
    }
  }

  fn allowed_comment_types(&self) -> Vec<String> {
    self.hooks.comment_types(self.site.comment_types.clone())
  }

  fn show_avatars(&self) -> bool { self.site.show_avatars }

  fn default_avatar_option(&self) -> String { self.site.avatar_default.clone() }

  fn avatar_rating_option(&self) -> String { self.site.avatar_rating.clone() }

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

// ─── Row helpers ─────────────────────────────────────────────────────────────

/// SQLite rowids are signed; ids beyond `i64::MAX` cannot exist.
fn sql_id(id: u64) -> Option<i64> { i64::try_from(id).ok() }

fn decode_user(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
  Ok(UserRecord {
    id:    row.get::<_, i64>(0)? as u64,
    login: row.get(1)?,
    email: row.get(2)?,
  })
}
