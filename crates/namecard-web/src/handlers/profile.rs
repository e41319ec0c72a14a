//! `GET /u/{slug}` — the server-rendered profile page.

use askama::Template;
use axum::{
  extract::{Path, State},
  response::Html,
};
use namecard_core::{
  action::{ContactAction, contact_actions},
  contact::Contact,
  store::ContactStore,
};
use namecard_qr::QrOptions;

use crate::{PageState, error::Error};

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage<'a> {
  pub contact:     &'a Contact,
  pub subtitle:    String,
  pub description: String,
  pub photo_src:   Option<&'a str>,
  pub actions:     Vec<ContactAction>,
  pub page_url:    &'a str,
  pub vcard_href:  String,
  pub vcard_name:  String,
  pub qr_src:      Option<&'a str>,
}

impl<'a> ProfilePage<'a> {
  pub fn new(contact: &'a Contact, page_url: &'a str, qr_src: Option<&'a str>) -> Self {
    let subtitle = contact.subtitle();
    let description = if contact.position.is_none() && contact.company.is_none() {
      format!("Contact card for {}", contact.full_name)
    } else {
      format!("{} | {subtitle}", contact.full_name)
    };

    Self {
      contact,
      subtitle,
      description,
      photo_src: contact.photo_src(),
      actions: contact_actions(contact),
      page_url,
      vcard_href: format!("/u/{}/contact.vcf", contact.slug),
      vcard_name: namecard_vcard::file_name(&contact.full_name),
      qr_src,
    }
  }
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage;

pub async fn handler<S: ContactStore>(
  State(state): State<PageState<S>>,
  Path(slug): Path<String>,
) -> Result<Html<String>, Error> {
  let contact = super::lookup(&state, &slug).await?;

  let page_url = state.config.profile_url(&contact.slug);
  let qr = namecard_qr::render(page_url.clone(), QrOptions::default()).await;

  let page = ProfilePage::new(&contact, &page_url, qr.data_uri());
  Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn description_uses_subtitle_when_present() {
    let mut c = Contact::named("jane", "Jane Doe");
    let url = "https://cards.example.com/u/jane";
    assert_eq!(
      ProfilePage::new(&c, url, None).description,
      "Contact card for Jane Doe"
    );

    c.position = Some("Designer".into());
    c.company = Some("Acme".into());
    assert_eq!(
      ProfilePage::new(&c, url, None).description,
      "Jane Doe | Designer • Acme"
    );
  }

  #[test]
  fn unavailable_qr_renders_placeholder() {
    let c = Contact::named("jane", "Jane Doe");
    let html = ProfilePage::new(&c, "https://cards.example.com/u/jane", None)
      .render()
      .unwrap();
    assert!(html.contains("QR unavailable"));
    assert!(!html.contains("data:image"));
  }

  #[test]
  fn external_actions_open_in_new_tab() {
    let mut c = Contact::named("jane", "Jane Doe");
    c.phone = Some("081-234 5678".into());
    c.website = Some("example.com".into());
    let html = ProfilePage::new(&c, "https://cards.example.com/u/jane", None)
      .render()
      .unwrap();

    assert!(html.contains("tel:0812345678\">"), "{html}");
    assert_eq!(html.matches("noopener noreferrer").count(), 1);
  }

  #[test]
  fn missing_photo_shows_placeholder() {
    let mut c = Contact::named("jane", "Jane Doe");
    c.photo_url = Some("avatars/relative.png".into());
    let html = ProfilePage::new(&c, "https://cards.example.com/u/jane", None)
      .render()
      .unwrap();
    assert!(html.contains("&#128100;"));
    assert!(!html.contains("relative.png"));
  }
}
