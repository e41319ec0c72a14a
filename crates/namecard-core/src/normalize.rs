//! Contact normaliser — raw reachability input to canonical links.
//!
//! Every function here is pure: a trimmed input string goes in, a canonical
//! `href` plus a display string comes out. Blank input yields `None`, which
//! callers treat as "field absent". Nothing in this module fails; input that
//! cannot be prettified falls back to its canonical form.

use url::Url;

use crate::contact::{is_http_url, starts_with_ignore_case};

/// A reachability value in its two presentation forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
  /// A fully-qualified URI, ready to use as a link target.
  pub href:    String,
  /// What a visitor sees on screen.
  pub display: String,
}

fn present(raw: Option<&str>) -> Option<&str> {
  raw.map(str::trim).filter(|s| !s.is_empty())
}

fn strip_at(s: &str) -> &str { s.trim_start_matches('@') }

// ─── Phone ───────────────────────────────────────────────────────────────────

/// Keep only digits and a single leading `+`.
///
/// `"(+66) 81-234 5678"` becomes `"+66812345678"`.
pub fn dial_string(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.trim().chars() {
    if c.is_ascii_digit() || (c == '+' && out.is_empty()) {
      out.push(c);
    }
  }
  out
}

/// `tel:` link for a phone number. Input without any digit is treated as
/// absent since it cannot form a dialable URI.
pub fn phone(raw: Option<&str>) -> Option<Normalized> {
  let s = present(raw)?;
  let number = dial_string(s);
  if !number.bytes().any(|b| b.is_ascii_digit()) {
    return None;
  }
  Some(Normalized {
    href:    format!("tel:{number}"),
    display: s.to_string(),
  })
}

// ─── Email ───────────────────────────────────────────────────────────────────

pub fn email(raw: Option<&str>) -> Option<Normalized> {
  let s = present(raw)?;
  Some(Normalized {
    href:    format!("mailto:{s}"),
    display: s.to_string(),
  })
}

// ─── Web ─────────────────────────────────────────────────────────────────────

/// Prefix `https://` unless the value already carries an `http(s)://` scheme.
pub fn with_https(s: &str) -> String {
  if is_http_url(s) {
    s.to_string()
  } else {
    format!("https://{s}")
  }
}

/// Host (with any non-default port) plus path, minus one trailing `/`.
///
/// Falls back to `href` unchanged when it does not parse as a URL with a host.
pub fn pretty_url(href: &str) -> String {
  let Ok(url) = Url::parse(href) else {
    return href.to_string();
  };
  let Some(host) = url.host_str() else {
    return href.to_string();
  };

  let mut out = host.to_string();
  if let Some(port) = url.port() {
    out.push(':');
    out.push_str(&port.to_string());
  }
  out.push_str(url.path());
  if out.ends_with('/') {
    out.pop();
  }
  out
}

pub fn website(raw: Option<&str>) -> Option<Normalized> {
  let s = present(raw)?;
  let href = with_https(s);
  Some(Normalized {
    display: pretty_url(&href),
    href,
  })
}

// ─── Social ──────────────────────────────────────────────────────────────────

/// LINE ID or link. Bare IDs become an add-friend link.
pub fn line(raw: Option<&str>) -> Option<Normalized> {
  let id = strip_at(present(raw)?);
  if id.is_empty() {
    return None;
  }
  let href = if is_http_url(id) || starts_with_ignore_case(id, "line://") {
    id.to_string()
  } else {
    format!("https://line.me/R/ti/p/~{id}")
  };
  Some(Normalized {
    href,
    display: id.to_string(),
  })
}

fn profile_link(raw: Option<&str>, domain: &str) -> Option<Normalized> {
  let s = present(raw)?;
  let href = if is_http_url(s) {
    s.to_string()
  } else {
    let handle = strip_at(s);
    if handle.is_empty() {
      return None;
    }
    format!("https://{domain}/{handle}")
  };
  Some(Normalized {
    display: pretty_url(&href),
    href,
  })
}

pub fn facebook(raw: Option<&str>) -> Option<Normalized> {
  profile_link(raw, "facebook.com")
}

pub fn instagram(raw: Option<&str>) -> Option<Normalized> {
  profile_link(raw, "instagram.com")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn href(n: Option<Normalized>) -> String { n.expect("present").href }

  // ── Phone ──────────────────────────────────────────────────────────────────

  #[test]
  fn phone_strips_punctuation() {
    assert_eq!(href(phone(Some("081-234 5678"))), "tel:0812345678");
    assert_eq!(href(phone(Some("(02) 123.4567"))), "tel:021234567");
  }

  #[test]
  fn phone_keeps_only_a_leading_plus() {
    assert_eq!(href(phone(Some(" +66 81 234 5678 "))), "tel:+66812345678");
    assert_eq!(href(phone(Some("(+66) 81+234"))), "tel:+6681234");
    assert_eq!(href(phone(Some("66+81"))), "tel:6681");
  }

  #[test]
  fn phone_href_contains_only_digits_and_leading_plus() {
    for raw in ["+1 (555) 010-9999", "081 234 5678 ext. 9", "++44--20"] {
      let h = href(phone(Some(raw)));
      let number = h.strip_prefix("tel:").unwrap();
      let body = number.strip_prefix('+').unwrap_or(number);
      assert!(body.bytes().all(|b| b.is_ascii_digit()), "{raw} -> {h}");
    }
  }

  #[test]
  fn phone_display_is_trimmed_input() {
    let n = phone(Some("  081-234 5678 ")).unwrap();
    assert_eq!(n.display, "081-234 5678");
  }

  #[test]
  fn phone_without_digits_is_absent() {
    assert_eq!(phone(Some("n/a")), None);
    assert_eq!(phone(Some("   ")), None);
    assert_eq!(phone(None), None);
  }

  // ── Email ──────────────────────────────────────────────────────────────────

  #[test]
  fn email_is_trimmed_mailto() {
    let n = email(Some(" jane@example.com ")).unwrap();
    assert_eq!(n.href, "mailto:jane@example.com");
    assert_eq!(n.display, "jane@example.com");
  }

  // ── Website ────────────────────────────────────────────────────────────────

  #[test]
  fn website_without_scheme_gets_https() {
    let n = website(Some("example.com")).unwrap();
    assert_eq!(n.href, "https://example.com");
    assert_eq!(n.display, "example.com");
  }

  #[test]
  fn website_with_scheme_passes_through() {
    assert_eq!(href(website(Some("http://example.com/a"))), "http://example.com/a");
    assert_eq!(href(website(Some("HTTPS://Example.com"))), "HTTPS://Example.com");
  }

  #[test]
  fn website_display_drops_scheme_and_trailing_slash() {
    let n = website(Some("https://www.example.com:8443/about/")).unwrap();
    assert_eq!(n.display, "www.example.com:8443/about");
    let n = website(Some("https://example.com:443/")).unwrap();
    assert_eq!(n.display, "example.com");
  }

  #[test]
  fn pretty_url_falls_back_on_unparseable_input() {
    assert_eq!(pretty_url("https://exa mple.com"), "https://exa mple.com");
    assert_eq!(pretty_url("not a url"), "not a url");
  }

  // ── LINE ───────────────────────────────────────────────────────────────────

  #[test]
  fn line_id_becomes_add_friend_link() {
    let n = line(Some("@jane")).unwrap();
    assert_eq!(n.href, "https://line.me/R/ti/p/~jane");
    assert_eq!(n.display, "jane");
  }

  #[test]
  fn line_links_pass_through() {
    assert_eq!(href(line(Some("line://ti/p/abc"))), "line://ti/p/abc");
    assert_eq!(href(line(Some("https://lin.ee/xyz"))), "https://lin.ee/xyz");
  }

  #[test]
  fn lone_at_signs_are_absent() {
    assert_eq!(line(Some("@@")), None);
    assert_eq!(facebook(Some("@")), None);
  }

  // ── Facebook / Instagram ───────────────────────────────────────────────────

  #[test]
  fn handles_map_to_platform_domain() {
    let fb = facebook(Some("@jane.doe")).unwrap();
    assert_eq!(fb.href, "https://facebook.com/jane.doe");
    assert_eq!(fb.display, "facebook.com/jane.doe");

    let ig = instagram(Some("@@jane")).unwrap();
    assert_eq!(ig.href, "https://instagram.com/jane");
    assert_eq!(ig.display, "instagram.com/jane");
  }

  #[test]
  fn profile_urls_pass_through() {
    let fb = facebook(Some("https://www.facebook.com/jane/")).unwrap();
    assert_eq!(fb.href, "https://www.facebook.com/jane/");
    assert_eq!(fb.display, "www.facebook.com/jane");
  }
}
