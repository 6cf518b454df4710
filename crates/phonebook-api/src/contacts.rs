//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | All contacts |
//! | `POST`   | `/contacts` | Body: `{"name":"...","no_telp":"..."}`; returns 201 |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `PATCH`  | `/contacts/:id` | Body as for `POST`; returns the updated contact |
//! | `DELETE` | `/contacts/:id` | Returns `{"message":"OK"}` |
//!
//! Ids must be positive integers and both body fields must be non-empty;
//! violations are rejected with 400 before the usecase is called.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use phonebook_core::{
  Contact, ContactInput, ContactRepository, ContactUsecase, contact::parse_id,
};
use serde_json::{Value, json};

use crate::error::ApiError;

type Usecase<R> = State<Arc<ContactUsecase<R>>>;

/// Unwrap a JSON body and check both fields are present.
fn valid_input(
  body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<ContactInput, ApiError> {
  let Json(input) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  input.validate()?;
  Ok(input)
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<R>(State(uc): Usecase<R>) -> Result<Json<Vec<Contact>>, ApiError>
where
  R: ContactRepository,
{
  let contacts = uc.list().await?;
  Ok(Json(contacts))
}

/// `POST /contacts`
pub async fn create<R>(
  State(uc): Usecase<R>,
  body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  R: ContactRepository,
{
  let input   = valid_input(body)?;
  let contact = uc.add(input).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Single contact ───────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<R>(
  State(uc): Usecase<R>,
  Path(raw_id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  R: ContactRepository,
{
  let id      = parse_id(&raw_id)?;
  let contact = uc.detail(id).await?;
  Ok(Json(contact))
}

/// `PATCH /contacts/:id`
pub async fn update_one<R>(
  State(uc): Usecase<R>,
  Path(raw_id): Path<String>,
  body: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<Contact>, ApiError>
where
  R: ContactRepository,
{
  let id      = parse_id(&raw_id)?;
  let input   = valid_input(body)?;
  let contact = uc.update(id, input).await?;
  Ok(Json(contact))
}

/// `DELETE /contacts/:id`
pub async fn delete_one<R>(
  State(uc): Usecase<R>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  R: ContactRepository,
{
  let id = parse_id(&raw_id)?;
  uc.delete(id).await?;
  Ok(Json(json!({ "message": "OK" })))
}
