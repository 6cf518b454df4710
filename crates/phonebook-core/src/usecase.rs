//! [`ContactUsecase`] — the seam between presentation adapters and storage.
//!
//! Every method forwards its arguments to the configured repository and hands
//! back the result untouched. Adapters construct one of these once at start-up
//! and never see the concrete backend type.

use crate::{Contact, ContactInput, ContactRepository, Result};

#[derive(Debug, Clone)]
pub struct ContactUsecase<R> {
  repo: R,
}

impl<R: ContactRepository> ContactUsecase<R> {
  pub fn new(repo: R) -> Self { Self { repo } }

  /// Borrow the underlying repository.
  pub fn repository(&self) -> &R { &self.repo }

  pub async fn list(&self) -> Result<Vec<Contact>> { self.repo.list().await }

  pub async fn add(&self, input: ContactInput) -> Result<Contact> {
    self.repo.add(input).await
  }

  pub async fn detail(&self, id: i64) -> Result<Contact> {
    self.repo.detail(id).await
  }

  pub async fn update(&self, id: i64, input: ContactInput) -> Result<Contact> {
    self.repo.update(id, input).await
  }

  pub async fn delete(&self, id: i64) -> Result<()> { self.repo.delete(id).await }
}
