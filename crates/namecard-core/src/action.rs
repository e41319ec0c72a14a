//! Contact actions — the clickable rows on a public profile.

use serde::Serialize;

use crate::{
  contact::Contact,
  normalize::{self, Normalized},
};

/// Which reachability field an action was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
  Phone,
  Email,
  Website,
  Line,
  Facebook,
  Instagram,
}

impl ActionKind {
  pub fn label(self) -> &'static str {
    match self {
      Self::Phone => "Call",
      Self::Email => "Email",
      Self::Website => "Website",
      Self::Line => "LINE",
      Self::Facebook => "Facebook",
      Self::Instagram => "Instagram",
    }
  }

  /// Web destinations open in a new tab; `tel:` and `mailto:` do not.
  pub fn is_external(self) -> bool {
    !matches!(self, Self::Phone | Self::Email)
  }
}

/// A `(label, display value, href)` triple for one populated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAction {
  pub kind:     ActionKind,
  pub label:    &'static str,
  pub value:    String,
  pub href:     String,
  pub external: bool,
}

impl ContactAction {
  fn new(kind: ActionKind, n: Normalized) -> Self {
    Self {
      kind,
      label: kind.label(),
      value: n.display,
      href: n.href,
      external: kind.is_external(),
    }
  }
}

/// Derive the action list for `contact`, in fixed order. Absent fields are
/// skipped entirely.
pub fn contact_actions(contact: &Contact) -> Vec<ContactAction> {
  [
    (ActionKind::Phone, normalize::phone(contact.phone.as_deref())),
    (ActionKind::Email, normalize::email(contact.email.as_deref())),
    (ActionKind::Website, normalize::website(contact.website.as_deref())),
    (ActionKind::Line, normalize::line(contact.line_id.as_deref())),
    (ActionKind::Facebook, normalize::facebook(contact.facebook.as_deref())),
    (ActionKind::Instagram, normalize::instagram(contact.instagram.as_deref())),
  ]
  .into_iter()
  .filter_map(|(kind, n)| n.map(|n| ContactAction::new(kind, n)))
  .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_contact_has_no_actions() {
    let mut c = Contact::named("jane", "Jane Doe");
    c.email = Some("   ".into());
    assert!(contact_actions(&c).is_empty());
  }

  #[test]
  fn jane_doe_example() {
    let mut c = Contact::named("jane", "Jane Doe");
    c.phone = Some("081-234 5678".into());
    c.website = Some("example.com".into());
    c.line_id = Some("@jane".into());

    let actions = contact_actions(&c);
    let hrefs: Vec<&str> = actions.iter().map(|a| a.href.as_str()).collect();
    assert_eq!(hrefs, [
      "tel:0812345678",
      "https://example.com",
      "https://line.me/R/ti/p/~jane",
    ]);
    assert_eq!(actions[2].value, "jane");
    assert!(!actions[0].external);
    assert!(actions[1].external);
  }

  #[test]
  fn actions_follow_fixed_order() {
    let mut c = Contact::named("jane", "Jane Doe");
    c.instagram = Some("jane".into());
    c.email = Some("jane@example.com".into());
    c.facebook = Some("jane".into());

    let kinds: Vec<ActionKind> =
      contact_actions(&c).iter().map(|a| a.kind).collect();
    assert_eq!(kinds, [
      ActionKind::Email,
      ActionKind::Facebook,
      ActionKind::Instagram,
    ]);
  }
}
