//! JSON REST API for the phonebook.
//!
//! Exposes an axum [`Router`] backed by a [`ContactUsecase`] over any
//! [`ContactRepository`]. Binding a listener is the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = phonebook_api::api_router(Arc::new(ContactUsecase::new(repo)));
//! axum::serve(listener, app).await?;
//! ```

pub mod contacts;
pub mod error;

use std::{any::Any, sync::Arc};

use axum::{
  Json, Router,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
};
use phonebook_core::{ContactRepository, ContactUsecase};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

/// Build the API router for `usecase`, wrapped in request tracing, permissive
/// CORS, and panic recovery.
pub fn api_router<R>(usecase: Arc<ContactUsecase<R>>) -> Router<()>
where
  R: ContactRepository + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<R>).post(contacts::create::<R>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<R>)
        .patch(contacts::update_one::<R>)
        .delete(contacts::delete_one::<R>),
    )
    .with_state(usecase)
    .layer(CatchPanicLayer::custom(panic_response))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// Turn a handler panic into a generic JSON 500.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
  let detail = panic
    .downcast_ref::<String>()
    .map(String::as_str)
    .or_else(|| panic.downcast_ref::<&str>().copied())
    .unwrap_or("unknown panic");
  tracing::error!(panic = detail, "handler panicked");

  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(json!({ "error": "Internal Server Error" })),
  )
    .into_response()
}

// ─── Integration tests ────────────────────────────────────────────────────────
