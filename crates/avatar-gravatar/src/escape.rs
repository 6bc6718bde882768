//! HTML attribute and URL escaping for the rendered `<img>` tag.

/// Protocols a `src` URL may carry. Scheme-relative and path URLs pass too.
const ALLOWED_PROTOCOLS: &[&str] = &[
  "http", "https", "ftp", "ftps", "mailto", "news", "irc", "gopher", "nntp",
  "feed", "telnet", "mms", "rtsp", "svn", "tel", "fax", "xmpp", "webcal",
];

/// Escape `value` for use inside a double-quoted attribute.
///
/// Well-formed entities already present are kept as they are.
pub fn escape_attr(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  let mut rest = value;
  while let Some(c) = rest.chars().next() {
    if c == '&'
      && let Some(entity) = entity_prefix(rest)
    {
      out.push_str(entity);
      rest = &rest[entity.len()..];
      continue;
    }
    rest = &rest[c.len_utf8()..];
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#039;"),
      c => out.push(c),
    }
  }
  out
}

/// Clean a URL for a `src` attribute.
///
/// Characters that cannot appear in a URL are dropped, `&` (including an
/// existing `&amp;`) becomes `&#038;`, `'` becomes `&#039;`, other
/// well-formed entities are kept, and a URL with a protocol outside
/// [`ALLOWED_PROTOCOLS`] is replaced by the empty string.
pub fn escape_url(url: &str) -> String {
  let cleaned: String = url.trim().chars().filter(|c| is_url_char(*c)).collect();

  if let Some((scheme, _)) = cleaned.split_once(':') {
    let looks_like_scheme = !scheme.is_empty()
      && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
    if looks_like_scheme
      && !ALLOWED_PROTOCOLS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(scheme))
    {
      return String::new();
    }
  }

  let mut out = String::with_capacity(cleaned.len());
  let mut rest = cleaned.as_str();
  while let Some(c) = rest.chars().next() {
    match c {
      '&' => match entity_prefix(rest) {
        Some(entity) => {
          out.push_str(if entity == "&amp;" { "&#038;" } else { entity });
          rest = &rest[entity.len()..];
          continue;
        }
        None => out.push_str("&#038;"),
      },
      '\'' => out.push_str("&#039;"),
      c => out.push(c),
    }
    rest = &rest[c.len_utf8()..];
  }
  out
}

/// The entity at the start of `s`: `&name;`, `&#123;` or `&#x7B;`.
fn entity_prefix(s: &str) -> Option<&str> {
  let body = s.strip_prefix('&')?;
  let end = body.find(';')?;
  let name = &body[..end];
  let well_formed = if let Some(digits) = name.strip_prefix('#') {
    match digits.strip_prefix(['x', 'X']) {
      Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
      None => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
    }
  } else {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
      && name.chars().all(|c| c.is_ascii_alphanumeric())
  };
  well_formed.then(|| &s[..end + 2])
}

fn is_url_char(c: char) -> bool {
  c.is_ascii_alphanumeric()
    || "-~+_.?#=!&;,/:%@$|*'()[]".contains(c)
    || !c.is_ascii()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn attr_escapes_markup_and_quotes() {
    assert_eq!(
      escape_attr("a'b\"c<d>h&i%j\\k"),
      "a&#039;b&quot;c&lt;d&gt;h&amp;i%j\\k"
    );
  }

  #[test]
  fn url_ampersands_become_entities() {
    assert_eq!(
      escape_url("http://2.gravatar.com/avatar/abc?s=96&d=mm"),
      "http://2.gravatar.com/avatar/abc?s=96&#038;d=mm"
    );
  }

  #[test]
  fn url_drops_quotes_and_brackets() {
    assert_eq!(
      escape_url("http://x.example/\"><script>"),
      "http://x.example/script"
    );
  }

  #[test]
  fn url_rejects_foreign_protocols() {
    assert_eq!(escape_url("javascript:alert(1)"), "");
    assert_eq!(escape_url("//0.gravatar.com/avatar/"), "//0.gravatar.com/avatar/");
  }

  #[test]
  fn url_keeps_other_known_protocols() {
    assert_eq!(
      escape_url("ftp://files.example.org/a.png"),
      "ftp://files.example.org/a.png"
    );
    assert_eq!(escape_url("mailto:me@example.org"), "mailto:me@example.org");
  }

  #[test]
  fn existing_entities_are_not_encoded_twice() {
    assert_eq!(escape_attr("a &amp; b &#039; &#x27; &"), "a &amp; b &#039; &#x27; &amp;");
    assert_eq!(escape_attr("&bogus; &;"), "&bogus; &amp;;");
    assert_eq!(
      escape_url("http://x.example/?a=1&amp;b=2&c=3&#038;d=4"),
      "http://x.example/?a=1&#038;b=2&#038;c=3&#038;d=4"
    );
  }
}
