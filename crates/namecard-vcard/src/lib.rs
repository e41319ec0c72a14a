//! vCard 3.0 codec for namecard.
//!
//! Converts between vCard strings and [`namecard_core`] contacts. Pure
//! synchronous; no HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use namecard_core::contact::Contact;
//!
//! let card = namecard_vcard::serialize(&Contact::named("jane", "Jane Doe"));
//! let input = namecard_vcard::parse_contact(&card).unwrap();
//! assert_eq!(input.full_name, "Jane Doe");
//! ```

pub mod error;
mod parse;
mod serialize;

pub use error::{Error, Result};
use namecard_core::contact::ContactInput;
pub use parse::{Card, Param, Property};
pub use serialize::{file_name, serialize};

/// Media type of a serialized card.
pub const MIME_TYPE: &str = "text/vcard; charset=utf-8";

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse exactly one `BEGIN:VCARD … END:VCARD` block from `input`.
pub fn parse(input: &str) -> Result<Card> { parse::parse_card(input) }

/// Parse one card and map it onto a [`ContactInput`].
///
/// The returned input carries no slug; the caller supplies one before
/// validation.
pub fn parse_contact(input: &str) -> Result<ContactInput> {
  parse::parse_card(input).map(|card| parse::to_input(&card))
}

// ─── Round-trip test ─────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use namecard_core::contact::Contact;

  use super::*;

  fn full_contact() -> Contact {
    let mut c = Contact::named("acme", "Doe, Jane; Q\\A");
    c.position = Some("Head of R&D; Design".into());
    c.company = Some("Acme, Inc.".into());
    c.phone = Some("+66 81-234-5678".into());
    c.email = Some("jane@example.com".into());
    c.website = Some("https://example.com/a,b".into());
    c.line_id = Some("@jane".into());
    c.facebook = Some("jane.doe".into());
    c.instagram = Some("@jane_doe".into());
    c
  }

  #[test]
  fn full_round_trip() {
    let card = serialize(&full_contact());
    let parsed = parse(&card).expect("parse failed");

    let names: Vec<&str> =
      parsed.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, [
      "VERSION",
      "FN",
      "ORG",
      "TITLE",
      "TEL",
      "EMAIL",
      "URL",
      "X-SOCIALPROFILE",
      "X-SOCIALPROFILE",
      "X-SOCIALPROFILE",
    ]);

    let input = parse_contact(&card).expect("parse_contact failed");
    assert_eq!(input.full_name, "Doe, Jane; Q\\A");
    assert_eq!(input.company.as_deref(), Some("Acme, Inc."));
    assert_eq!(input.position.as_deref(), Some("Head of R&D; Design"));
    assert_eq!(input.phone.as_deref(), Some("+66812345678"));
    assert_eq!(input.email.as_deref(), Some("jane@example.com"));
    assert_eq!(input.website.as_deref(), Some("https://example.com/a,b"));
    assert_eq!(
      input.line_id.as_deref(),
      Some("https://line.me/R/ti/p/~jane")
    );
    assert_eq!(
      input.facebook.as_deref(),
      Some("https://facebook.com/jane.doe")
    );
    assert_eq!(
      input.instagram.as_deref(),
      Some("https://instagram.com/jane_doe")
    );
  }

  #[test]
  fn each_field_appears_once() {
    let card = parse(&serialize(&full_contact())).unwrap();
    for name in ["FN", "ORG", "TITLE", "TEL", "EMAIL", "URL"] {
      assert_eq!(card.count(name), 1, "{name}");
    }
    assert_eq!(card.count("X-SOCIALPROFILE"), 3);
  }

  #[test]
  fn minimal_card_maps_to_name_only() {
    let input =
      parse_contact(&serialize(&Contact::named("jane", "Jane Doe"))).unwrap();
    assert_eq!(input, ContactInput {
      full_name: "Jane Doe".into(),
      ..Default::default()
    });
  }

  #[test]
  fn windows_line_breaks_round_trip_as_newlines() {
    let mut c = Contact::named("jane", "Jane\r\nDoe");
    c.company = Some("Acme\rCo".into());
    let card = serialize(&c);
    assert!(!card.contains('\r'));

    let input = parse_contact(&card).unwrap();
    assert_eq!(input.full_name, "Jane\nDoe");
    assert_eq!(input.company.as_deref(), Some("Acme\nCo"));
  }

  #[test]
  fn foreign_card_with_crlf_and_groups() {
    let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Somchai\r\n\
                 item1.TEL;TYPE=CELL:081 111 2222\r\nitem1.X-ABLabel:mobile\r\n\
                 X-SOCIALPROFILE;TYPE=Instagram:somchai\r\nEND:VCARD\r\n";
    let contact = parse_contact(input).unwrap();
    assert_eq!(contact.full_name, "Somchai");
    assert_eq!(contact.phone.as_deref(), Some("081 111 2222"));
    assert_eq!(contact.instagram.as_deref(), Some("somchai"));
    assert_eq!(contact.line_id, None);
  }
}
