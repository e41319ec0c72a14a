//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Optional `?q=&limit=&offset=` |
//! | `POST`   | `/contacts` | Body: `ContactInput` JSON |
//! | `POST`   | `/contacts/import` | Body: one vCard; optional `?slug=` |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Full replace |
//! | `DELETE` | `/contacts/{id}` | 204 on success |
//! | `PUT`    | `/contacts/{id}/avatar` | Raw `image/*` body; optional `?name=` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use chrono::Utc;
use namecard_core::{
  contact::{Contact, ContactInput, ContactSummary, NewContact},
  store::{ContactQuery, ContactStore, ObjectStore, avatar_key},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// Reject `new` if its slug belongs to a contact other than `own_id`.
async fn ensure_slug_free<S: ContactStore>(
  store: &S,
  new: &NewContact,
  own_id: Option<Uuid>,
) -> Result<(), ApiError> {
  let holder = store
    .find_by_slug(&new.slug)
    .await
    .map_err(ApiError::from_store)?;
  match holder {
    Some(c) if Some(c.id) != own_id => {
      Err(ApiError::Conflict(format!("slug {:?} is already in use", new.slug)))
    }
    _ => Ok(()),
  }
}

async fn insert<S: ContactStore>(
  store: &S,
  input: ContactInput,
) -> Result<Contact, ApiError> {
  let new = input.validate()?;
  ensure_slug_free(store, &new, None).await?;
  let contact = store.create(new).await.map_err(ApiError::from_store)?;
  tracing::info!(id = %contact.id, slug = %contact.slug, "contact created");
  Ok(contact)
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /contacts[?q=<text>&limit=<n>&offset=<n>]`
pub async fn list<S, O>(
  State(state): State<ApiState<S, O>>,
  Query(query): Query<ContactQuery>,
) -> Result<Json<Vec<ContactSummary>>, ApiError>
where
  S: ContactStore,
  O: ObjectStore,
{
  let contacts = state
    .store
    .list(&query)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(contacts))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /contacts`
pub async fn create<S, O>(
  State(state): State<ApiState<S, O>>,
  Json(input): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
  O: ObjectStore,
{
  let contact = insert(state.store.as_ref(), input).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Import ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImportParams {
  pub slug: Option<String>,
}

/// `POST /contacts/import[?slug=<slug>]` — body: a single vCard.
///
/// Without a non-blank `slug` parameter the slug is derived from the card's
/// `FN`.
pub async fn import<S, O>(
  State(state): State<ApiState<S, O>>,
  Query(params): Query<ImportParams>,
  body: String,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
  O: ObjectStore,
{
  let mut input = namecard_vcard::parse_contact(&body)?;
  input.slug = params
    .slug
    .filter(|s| !s.trim().is_empty())
    .unwrap_or_else(|| input.full_name.clone());
  let contact = insert(state.store.as_ref(), input).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S, O>(
  State(state): State<ApiState<S, O>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  O: ObjectStore,
{
  let contact = state
    .store
    .get(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  Ok(Json(contact))
}

// ─── Replace ─────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}` — every field is overwritten.
pub async fn replace<S, O>(
  State(state): State<ApiState<S, O>>,
  Path(id): Path<Uuid>,
  Json(input): Json<ContactInput>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  O: ObjectStore,
{
  let new = input.validate()?;
  ensure_slug_free(state.store.as_ref(), &new, Some(id)).await?;
  let contact = state
    .store
    .replace(id, new)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  tracing::info!(%id, slug = %contact.slug, "contact replaced");
  Ok(Json(contact))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
pub async fn delete_one<S, O>(
  State(state): State<ApiState<S, O>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ContactStore,
  O: ObjectStore,
{
  let removed = state
    .store
    .delete(id)
    .await
    .map_err(ApiError::from_store)?;
  if !removed {
    return Err(ApiError::NotFound(format!("contact {id} not found")));
  }
  tracing::info!(%id, "contact deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Avatar ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AvatarParams {
  /// Original file name; sanitised into the object key.
  pub name: Option<String>,
}

/// `PUT /contacts/{id}/avatar[?name=<file name>]` — body: raw image bytes.
///
/// Stores the image, points `avatar_url` at it and returns the updated
/// contact.
pub async fn upload_avatar<S, O>(
  State(state): State<ApiState<S, O>>,
  Path(id): Path<Uuid>,
  Query(params): Query<AvatarParams>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  O: ObjectStore,
{
  let content_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .filter(|ct| ct.starts_with("image/"))
    .ok_or_else(|| {
      ApiError::UnsupportedMediaType("avatar must be an image/* body".into())
    })?
    .to_string();
  if body.is_empty() {
    return Err(ApiError::BadRequest("avatar body is empty".into()));
  }

  let contact = state
    .store
    .get(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;

  let file_name = params.name.as_deref().unwrap_or("avatar");
  let key = avatar_key(&contact.slug, file_name, Utc::now());
  state
    .objects
    .put(key.clone(), content_type, body)
    .await
    .map_err(ApiError::from_objects)?;

  let mut input = ContactInput::from(contact);
  input.avatar_url = Some(state.objects.public_url(&key));
  let contact = state
    .store
    .replace(id, input.validate()?)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;

  tracing::info!(%id, %key, "avatar uploaded");
  Ok(Json(contact))
}
