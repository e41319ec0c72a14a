//! vCard 3.0 content-line reader.
//!
//! Pipeline:
//!   raw &str
//!     └─ unfold_lines()       → Vec<String>
//!          └─ locate the single BEGIN/END block
//!               └─ parse_content_line() → Property (value unescaped)

use namecard_core::contact::ContactInput;

use crate::error::{Error, Result};

// ─── Parsed representation ───────────────────────────────────────────────────

/// A `NAME;PARAM=VALUE:value` content line. `name` is upper-cased with any
/// group prefix removed; `value` is unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
  pub name:   String,
  pub params: Vec<Param>,
  pub value:  String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
  pub name:  String,
  pub value: String,
}

impl Property {
  /// Value of the first parameter called `name` (case-insensitive).
  pub fn param(&self, name: &str) -> Option<&str> {
    self
      .params
      .iter()
      .find(|p| p.name.eq_ignore_ascii_case(name))
      .map(|p| p.value.as_str())
  }
}

/// The properties of one card, in file order, excluding `BEGIN`/`END`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
  pub properties: Vec<Property>,
}

impl Card {
  /// First property called `name`.
  pub fn first(&self, name: &str) -> Option<&Property> {
    self.properties.iter().find(|p| p.name == name)
  }

  /// Number of properties called `name`.
  pub fn count(&self, name: &str) -> usize {
    self.properties.iter().filter(|p| p.name == name).count()
  }
}

// ─── Low-level helpers ───────────────────────────────────────────────────────

/// Join continuation lines (leading space or tab) onto their predecessor.
/// Accepts CRLF or bare LF; blank lines are dropped.
pub(crate) fn unfold_lines(s: &str) -> Vec<String> {
  let mut lines: Vec<String> = Vec::new();
  for raw in s.split('\n') {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    match line.strip_prefix([' ', '\t']) {
      Some(rest) => {
        if let Some(last) = lines.last_mut() {
          last.push_str(rest);
        }
      }
      None if !line.is_empty() => lines.push(line.to_string()),
      None => {}
    }
  }
  lines
}

/// Undo text-value escaping: `\\`, `\n`/`\N`, `\,`, `\;`.
pub(crate) fn unescape_value(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('n' | 'N') => out.push('\n'),
      Some(other) => out.push(other),
      None => out.push('\\'),
    }
  }
  out
}

/// Byte offset of the first `:` outside double quotes.
fn find_unquoted_colon(s: &str) -> Option<usize> {
  let mut in_quotes = false;
  s.char_indices().find_map(|(i, c)| {
    match c {
      '"' => in_quotes = !in_quotes,
      ':' if !in_quotes => return Some(i),
      _ => {}
    }
    None
  })
}

fn parse_param(token: &str) -> Param {
  match token.split_once('=') {
    Some((name, value)) => Param {
      name:  name.trim().to_uppercase(),
      value: value.trim().trim_matches('"').to_string(),
    },
    // vCard 2.1 bare parameters (`TEL;CELL:`) are shorthand for TYPE.
    None => Param {
      name:  "TYPE".to_string(),
      value: token.trim().to_string(),
    },
  }
}

fn parse_content_line(line: &str) -> Result<Property> {
  let colon = find_unquoted_colon(line)
    .ok_or_else(|| Error::MalformedContentLine(line.to_string()))?;

  let mut tokens = line[..colon].split(';');
  let raw_name = tokens.next().unwrap_or_default().trim();
  if raw_name.is_empty() {
    return Err(Error::MalformedContentLine(line.to_string()));
  }

  // Strip group prefix (e.g. "item1.TEL" → "TEL")
  let name = raw_name
    .rsplit_once('.')
    .map_or(raw_name, |(_, n)| n)
    .to_uppercase();

  Ok(Property {
    name,
    params: tokens.filter(|t| !t.is_empty()).map(parse_param).collect(),
    value: unescape_value(&line[colon + 1..]),
  })
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Parse exactly one `BEGIN:VCARD … END:VCARD` block.
pub fn parse_card(input: &str) -> Result<Card> {
  let lines = unfold_lines(input);

  let begins: Vec<usize> = lines
    .iter()
    .enumerate()
    .filter(|(_, l)| l.trim().eq_ignore_ascii_case("BEGIN:VCARD"))
    .map(|(i, _)| i)
    .collect();

  let start = match begins.as_slice() {
    [] => return Err(Error::MissingEnvelope),
    [only] => *only,
    many => return Err(Error::MultipleCards(many.len())),
  };

  let end = lines[start + 1..]
    .iter()
    .position(|l| l.trim().eq_ignore_ascii_case("END:VCARD"))
    .map(|offset| start + 1 + offset)
    .ok_or(Error::MissingEnvelope)?;

  let properties = lines[start + 1..end]
    .iter()
    .map(|l| parse_content_line(l))
    .collect::<Result<Vec<_>>>()?;

  Ok(Card { properties })
}

// ─── Contact mapping ─────────────────────────────────────────────────────────

/// Map a parsed card onto a [`ContactInput`]. The first occurrence of each
/// property wins; unknown properties are ignored. The slug is left empty.
pub(crate) fn to_input(card: &Card) -> ContactInput {
  let value = |name: &str| card.first(name).map(|p| p.value.clone());
  let social = |kind: &str| {
    card
      .properties
      .iter()
      .filter(|p| p.name == "X-SOCIALPROFILE")
      .find(|p| p.param("TYPE").is_some_and(|t| t.eq_ignore_ascii_case(kind)))
      .map(|p| p.value.clone())
  };

  ContactInput {
    full_name: value("FN").unwrap_or_default(),
    company: value("ORG"),
    position: value("TITLE"),
    phone: value("TEL"),
    email: value("EMAIL"),
    website: value("URL"),
    line_id: social("line"),
    facebook: social("facebook"),
    instagram: social("instagram"),
    ..Default::default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unfolds_continuations_and_tolerates_crlf() {
    let lines = unfold_lines("BEGIN:VCARD\r\nNOTE:one\r\n  two\r\n\r\nEND:VCARD\r\n");
    assert_eq!(lines, ["BEGIN:VCARD", "NOTE:one two", "END:VCARD"]);
  }

  #[test]
  fn unescape_reverses_text_escaping() {
    assert_eq!(unescape_value(r"a\\b\,c\;d\ne"), "a\\b,c;d\ne");
    assert_eq!(unescape_value(r"trailing\"), "trailing\\");
  }

  #[test]
  fn content_line_with_params_and_group() {
    let p = parse_content_line("item1.X-SOCIALPROFILE;type=line:https://line.me").unwrap();
    assert_eq!(p.name, "X-SOCIALPROFILE");
    assert_eq!(p.param("TYPE"), Some("line"));
    assert_eq!(p.value, "https://line.me");
  }

  #[test]
  fn bare_param_is_a_type() {
    let p = parse_content_line("TEL;CELL:0812345678").unwrap();
    assert_eq!(p.param("type"), Some("CELL"));
  }

  #[test]
  fn missing_colon_is_malformed() {
    let err = parse_card("BEGIN:VCARD\nFN Jane\nEND:VCARD").unwrap_err();
    assert!(matches!(err, Error::MalformedContentLine(_)));
  }

  #[test]
  fn missing_end_is_rejected() {
    assert_eq!(parse_card("BEGIN:VCARD\nFN:Jane\n"), Err(Error::MissingEnvelope));
    assert_eq!(parse_card("FN:Jane"), Err(Error::MissingEnvelope));
  }

  #[test]
  fn two_cards_are_rejected() {
    let input = "BEGIN:VCARD\nFN:A\nEND:VCARD\nBEGIN:VCARD\nFN:B\nEND:VCARD";
    assert_eq!(parse_card(input), Err(Error::MultipleCards(2)));
  }
}
