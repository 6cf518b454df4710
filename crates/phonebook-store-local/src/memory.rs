//! [`ContactBook`] and the in-memory [`MemoryRepository`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use phonebook_core::{Contact, ContactInput, ContactRepository, Error, Result};

// ─── Book ────────────────────────────────────────────────────────────────────

/// An owned, ordered collection of contacts plus its id allocation rule.
///
/// New ids are `max(existing) + 1`, recomputed on every insert. Deleting the
/// contact holding the highest id therefore frees that id for reuse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBook {
  contacts: Vec<Contact>,
}

impl ContactBook {
  pub fn new() -> Self { Self::default() }

  /// Build a book from existing records, keeping their order and ids.
  pub fn with_contacts(contacts: Vec<Contact>) -> Self { Self { contacts } }

  /// All contacts in insertion order.
  pub fn contacts(&self) -> &[Contact] { &self.contacts }

  pub fn into_contacts(self) -> Vec<Contact> { self.contacts }

  pub fn len(&self) -> usize { self.contacts.len() }

  pub fn is_empty(&self) -> bool { self.contacts.is_empty() }

  /// The id the next [`insert`](Self::insert) will assign. Fails once the
  /// highest stored id is `i64::MAX`.
  pub fn next_id(&self) -> Result<i64> {
    let max = self.contacts.iter().map(|c| c.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(Error::IdsExhausted(max))
  }

  pub fn insert(&mut self, input: ContactInput) -> Result<Contact> {
    let contact = Contact::new(self.next_id()?, input);
    self.contacts.push(contact.clone());
    Ok(contact)
  }

  pub fn get(&self, id: i64) -> Result<&Contact> {
    self
      .contacts
      .iter()
      .find(|c| c.id == id)
      .ok_or(Error::NotFound(id))
  }

  pub fn update(&mut self, id: i64, input: ContactInput) -> Result<Contact> {
    let contact = self
      .contacts
      .iter_mut()
      .find(|c| c.id == id)
      .ok_or(Error::NotFound(id))?;
    contact.apply(input);
    Ok(contact.clone())
  }

  pub fn remove(&mut self, id: i64) -> Result<Contact> {
    let index = self
      .contacts
      .iter()
      .position(|c| c.id == id)
      .ok_or(Error::NotFound(id))?;
    Ok(self.contacts.remove(index))
  }
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// A repository over a [`ContactBook`] shared with its creator.
///
/// Clones operate on the same book.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
  book: Arc<Mutex<ContactBook>>,
}

impl MemoryRepository {
  pub fn new(book: Arc<Mutex<ContactBook>>) -> Self { Self { book } }

  /// Convenience constructor that takes ownership of a fresh book.
  pub fn from_book(book: ContactBook) -> Self {
    Self::new(Arc::new(Mutex::new(book)))
  }

  fn book(&self) -> MutexGuard<'_, ContactBook> {
    // A panic while holding the lock cannot leave a book half-mutated.
    self.book.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl ContactRepository for MemoryRepository {
  async fn list(&self) -> Result<Vec<Contact>> {
    Ok(self.book().contacts().to_vec())
  }

  async fn add(&self, input: ContactInput) -> Result<Contact> {
    let contact = self.book().insert(input)?;
    tracing::debug!(id = contact.id, "memory: added contact");
    Ok(contact)
  }

  async fn detail(&self, id: i64) -> Result<Contact> {
    self.book().get(id).cloned()
  }

  async fn update(&self, id: i64, input: ContactInput) -> Result<Contact> {
    let contact = self.book().update(id, input)?;
    tracing::debug!(id, "memory: updated contact");
    Ok(contact)
  }

  async fn delete(&self, id: i64) -> Result<()> {
    self.book().remove(id)?;
    tracing::debug!(id, "memory: deleted contact");
    Ok(())
  }
}
