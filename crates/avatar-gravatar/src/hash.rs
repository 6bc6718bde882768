//! Email hashing and shard selection.

use md5::{Digest, Md5};

/// Number of numbered image hosts requests are spread over.
pub const SHARDS: u32 = 3;

/// Bytes stripped from both ends of an address before hashing.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// MD5 of the trimmed, lower-cased address, as lower-case hex.
///
/// Only ASCII space and control whitespace is trimmed; other Unicode
/// whitespace is part of the address.
pub fn email_hash(email: &str) -> String {
  let normalized = email.trim_matches(TRIMMED).to_ascii_lowercase();
  hex::encode(Md5::digest(normalized.as_bytes()))
}

/// Shard for `hash`: the value of its first hex digit modulo [`SHARDS`].
///
/// An empty hash, or one starting with a non-hex character, counts as 0.
pub fn shard(hash: &str) -> u32 {
  hash
    .chars()
    .next()
    .and_then(|c| c.to_digit(16))
    .unwrap_or(0)
    % SHARDS
}
