//! Public, unauthenticated handlers under `/u/{slug}`.

pub mod profile;
pub mod qr;
pub mod vcard;

use namecard_core::{contact::Contact, store::ContactStore};

use crate::{PageState, error::Error};

/// Look up the published profile for `slug`, or fail with the not-found page.
async fn lookup<S: ContactStore>(
  state: &PageState<S>,
  slug: &str,
) -> Result<Contact, Error> {
  state.directory.profile(slug).await.ok_or(Error::NotFound)
}
