//! vCard 3.0 serializer.
//!
//! Lines are joined with a bare `\n` and never folded. Values destined for
//! `TEL`, `URL` and `X-SOCIALPROFILE` go through the contact normaliser first,
//! so the card carries the same links the profile page shows.

use namecard_core::{contact::Contact, normalize};

// ─── Value escaping ──────────────────────────────────────────────────────────

/// Escape a text value: `\`, newline, `,`, `;`.
///
/// `\r\n` and lone `\r` count as newlines, so no carriage return reaches the
/// card. The backslash pass must run first so later passes never
/// double-escape the backslashes they introduce.
pub(crate) fn escape_value(s: &str) -> String {
  s.replace("\r\n", "\n")
   .replace('\r', "\n")
   .replace('\\', "\\\\")
   .replace('\n', "\\n")
   .replace(',', "\\,")
   .replace(';', "\\;")
}

fn present(v: Option<&str>) -> Option<String> {
  v.map(str::trim)
   .filter(|s| !s.is_empty())
   .map(str::to_string)
}

// ─── Serializer ──────────────────────────────────────────────────────────────

/// Serialize `contact` as a vCard 3.0 string.
///
/// Emission order is fixed: FN, ORG, TITLE, TEL, EMAIL, URL, then the LINE,
/// Facebook and Instagram profiles. Absent fields produce no line; `FN` is
/// always written, even when the name is empty.
pub fn serialize(contact: &Contact) -> String {
  let mut lines: Vec<String> = vec![
    "BEGIN:VCARD".to_string(),
    "VERSION:3.0".to_string(),
    format!("FN:{}", escape_value(&contact.full_name)),
  ];

  let tel = normalize::phone(contact.phone.as_deref())
    .and_then(|n| n.href.strip_prefix("tel:").map(str::to_string));

  let optional = [
    ("ORG", present(contact.company.as_deref())),
    ("TITLE", present(contact.position.as_deref())),
    ("TEL;TYPE=CELL", tel),
    (
      "EMAIL;TYPE=INTERNET",
      normalize::email(contact.email.as_deref()).map(|n| n.display),
    ),
    ("URL", normalize::website(contact.website.as_deref()).map(|n| n.href)),
    (
      "X-SOCIALPROFILE;type=line",
      normalize::line(contact.line_id.as_deref()).map(|n| n.href),
    ),
    (
      "X-SOCIALPROFILE;type=facebook",
      normalize::facebook(contact.facebook.as_deref()).map(|n| n.href),
    ),
    (
      "X-SOCIALPROFILE;type=instagram",
      normalize::instagram(contact.instagram.as_deref()).map(|n| n.href),
    ),
  ];

  for (prop, value) in optional {
    if let Some(value) = value {
      lines.push(format!("{prop}:{}", escape_value(&value)));
    }
  }

  lines.push("END:VCARD".to_string());
  lines.join("\n")
}

/// Suggested download name: whitespace runs become `_`, extension `.vcf`.
/// An empty name falls back to `contact.vcf`.
pub fn file_name(full_name: &str) -> String {
  let base = if full_name.is_empty() { "contact" } else { full_name };

  let mut out = String::with_capacity(base.len() + 4);
  let mut in_space = false;
  for c in base.chars() {
    if c.is_whitespace() {
      if !in_space {
        out.push('_');
      }
      in_space = true;
    } else {
      out.push(c);
      in_space = false;
    }
  }
  out.push_str(".vcf");
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
