//! Gravatar URL and `<img>` tag resolution.
//!
//! Pure synchronous; every external need (user lookup, site options, hooks)
//! goes through a [`HostServices`](avatar_core::HostServices).
//!
//! # Quick start
//!
//! ```no_run
//! use avatar_core::{MemoryHost, SiteOptions, options::AvatarOptions, subject::AvatarSubject};
//!
//! let mut host = MemoryHost::new(SiteOptions::default());
//! let user = host.add_user("user", "user@example.org");
//!
//! let subject = AvatarSubject::UserId(user.id as i64);
//! let resolved = avatar_gravatar::get_avatar_url(&subject, &AvatarOptions::default(), &host).unwrap();
//! println!("{}", resolved.url);
//! ```

pub mod escape;
pub mod hash;
mod normalize;
mod tag;
mod url;

pub use normalize::process_options;
pub use tag::get_avatar;
pub use url::{ResolvedUrl, get_avatar_url};

// ─── Shared test helpers ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_helpers {
  use avatar_core::{MemoryHost, SiteOptions, subject::CommentRecord};

  pub(crate) const USER_EMAIL: &str = "UsEr@exaMple.oRg";
  pub(crate) const DELETED_USER_EMAIL: &str = "dOdO@ExampLe.oRg";
  pub(crate) const GUEST_EMAIL: &str = "GuesT@eXample.oRg";

  pub(crate) const USER_EMAIL_MD5: &str = "572c3489ea700045927076136a969e27";
  pub(crate) const DELETED_USER_EMAIL_MD5: &str =
    "7736907f09ecae4d1400c18f499a61f8";
  pub(crate) const GUEST_EMAIL_MD5: &str = "cde48bd0bea0bbc6bc6bb02a461d946e";

  /// A host with one live user and one user that has been deleted.
  pub(crate) struct Fixture {
    pub(crate) host:            MemoryHost,
    pub(crate) user_id:         u64,
    pub(crate) deleted_user_id: u64,
  }

  impl Fixture {
    pub(crate) fn new() -> Self {
      let mut host = MemoryHost::new(SiteOptions::default());
      let user_id = host.add_user("user", USER_EMAIL).id;
      let deleted_user_id = host.add_user("dodo", DELETED_USER_EMAIL).id;
      host.delete_user(deleted_user_id);
      Self {
        host,
        user_id,
        deleted_user_id,
      }
    }

    pub(crate) fn comment_by_user(&self) -> CommentRecord {
      CommentRecord {
        id:           1,
        user_id:      Some(self.user_id),
        author_email: None,
        comment_type: None,
      }
    }

    pub(crate) fn comment_by_deleted_user(&self) -> CommentRecord {
      CommentRecord {
        id:           2,
        user_id:      Some(self.deleted_user_id),
        author_email: Some(DELETED_USER_EMAIL.to_string()),
        comment_type: None,
      }
    }
  }
}
