//! The `ContactRepository` trait.
//!
//! The trait is implemented by storage backends (`phonebook-store-local`,
//! `phonebook-store-sqlite`). Higher layers depend on this abstraction, not on
//! any concrete backend.

use std::{future::Future, sync::Arc};

use crate::{Contact, ContactInput, Result};

/// Uniform CRUD interface over a contact storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactRepository: Send + Sync {
  /// Return every stored contact. SQL backends order by id ascending; the
  /// local backends return insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<Contact>>> + Send + '_;

  /// Persist a new contact. The backend assigns the id.
  fn add(
    &self,
    input: ContactInput,
  ) -> impl Future<Output = Result<Contact>> + Send + '_;

  /// Fetch one contact. Fails with [`Error::NotFound`](crate::Error::NotFound)
  /// if no contact has this id.
  fn detail(&self, id: i64) -> impl Future<Output = Result<Contact>> + Send + '_;

  /// Replace the name and phone of an existing contact and return its
  /// post-update state. The id never changes.
  fn update(
    &self,
    id: i64,
    input: ContactInput,
  ) -> impl Future<Output = Result<Contact>> + Send + '_;

  /// Remove a contact. Fails with `NotFound` if no contact has this id.
  fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_;
}

impl<R: ContactRepository> ContactRepository for Arc<R> {
  fn list(&self) -> impl Future<Output = Result<Vec<Contact>>> + Send + '_ {
    (**self).list()
  }

  fn add(
    &self,
    input: ContactInput,
  ) -> impl Future<Output = Result<Contact>> + Send + '_ {
    (**self).add(input)
  }

  fn detail(&self, id: i64) -> impl Future<Output = Result<Contact>> + Send + '_ {
    (**self).detail(id)
  }

  fn update(
    &self,
    id: i64,
    input: ContactInput,
  ) -> impl Future<Output = Result<Contact>> + Send + '_ {
    (**self).update(id, input)
  }

  fn delete(&self, id: i64) -> impl Future<Output = Result<()>> + Send + '_ {
    (**self).delete(id)
  }
}
