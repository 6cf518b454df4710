//! [`JsonFileRepository`] — contacts persisted as a JSON array in one file.
//!
//! Every call loads the whole file into a [`ContactBook`], applies the
//! operation, and (for mutations) writes the whole collection back before
//! returning. Nothing is cached between calls.

use std::{
  collections::HashSet,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use phonebook_core::{Contact, ContactInput, ContactRepository, Error, Result};
use serde::de::Error as _;
use tokio::sync::Mutex;

use crate::memory::ContactBook;

#[derive(Debug)]
pub struct JsonFileRepository {
  path: PathBuf,
  /// Serialises load/save cycles issued through this instance.
  lock: Mutex<()>,
}

impl JsonFileRepository {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), lock: Mutex::new(()) }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Read and decode the file. A missing or blank file is an empty book.
  async fn load(&self) -> Result<ContactBook> {
    let raw = match tokio::fs::read(&self.path).await {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ContactBook::new()),
      Err(e) => {
        tracing::warn!(path = %self.path.display(), error = %e, "json: read failed");
        return Err(e.into());
      }
    };

    if raw.iter().all(u8::is_ascii_whitespace) {
      return Ok(ContactBook::new());
    }

    let contacts: Vec<Contact> = serde_json::from_slice(&raw)?;
    check_ids(&contacts)?;
    Ok(ContactBook::with_contacts(contacts))
  }

  /// Encode the book and rewrite the file wholesale.
  async fn save(&self, book: &ContactBook) -> Result<()> {
    let encoded = serde_json::to_vec_pretty(book.contacts())?;

    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(&self.path, encoded).await?;
    Ok(())
  }
}

/// Stored ids must be positive and unique; anything else is a corrupt file.
fn check_ids(contacts: &[Contact]) -> Result<()> {
  let mut seen = HashSet::with_capacity(contacts.len());
  for c in contacts {
    if c.id <= 0 {
      return Err(Error::Format(serde_json::Error::custom(format!(
        "contact id must be positive, found {}",
        c.id
      ))));
    }
    if !seen.insert(c.id) {
      return Err(Error::Format(serde_json::Error::custom(format!(
        "duplicate contact id {}",
        c.id
      ))));
    }
  }
  Ok(())
}

impl ContactRepository for JsonFileRepository {
  async fn list(&self) -> Result<Vec<Contact>> {
    let _guard = self.lock.lock().await;
    Ok(self.load().await?.into_contacts())
  }

  async fn add(&self, input: ContactInput) -> Result<Contact> {
    let _guard   = self.lock.lock().await;
    let mut book = self.load().await?;
    let contact  = book.insert(input)?;
    self.save(&book).await?;
    tracing::debug!(id = contact.id, path = %self.path.display(), "json: added contact");
    Ok(contact)
  }

  async fn detail(&self, id: i64) -> Result<Contact> {
    let _guard = self.lock.lock().await;
    self.load().await?.get(id).cloned()
  }

  async fn update(&self, id: i64, input: ContactInput) -> Result<Contact> {
    let _guard   = self.lock.lock().await;
    let mut book = self.load().await?;
    let contact  = book.update(id, input)?;
    self.save(&book).await?;
    tracing::debug!(id, path = %self.path.display(), "json: updated contact");
    Ok(contact)
  }

  async fn delete(&self, id: i64) -> Result<()> {
    let _guard   = self.lock.lock().await;
    let mut book = self.load().await?;
    book.remove(id)?;
    self.save(&book).await?;
    tracing::debug!(id, path = %self.path.display(), "json: deleted contact");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use tempfile::TempDir;

  use super::*;

  fn repo_in(dir: &TempDir) -> JsonFileRepository {
    JsonFileRepository::new(dir.path().join("data").join("contact.json"))
  }

  #[tokio::test]
  async fn missing_file_lists_empty() {
    let dir  = TempDir::new().unwrap();
    let repo = repo_in(&dir);
    assert!(repo.list().await.unwrap().is_empty());
    assert!(!repo.path().exists());
  }

  #[tokio::test]
  async fn blank_file_lists_empty() {
    let dir  = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    std::fs::write(&path, "  \n").unwrap();
    let repo = JsonFileRepository::new(&path);
    assert!(repo.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn add_creates_file_and_detail_reads_back() {
    let dir  = TempDir::new().unwrap();
    let repo = repo_in(&dir);

    let added = repo.add(ContactInput::new("adli", "0984738")).await.unwrap();
    assert_eq!(added.id, 1);
    assert!(repo.path().exists());

    // A fresh instance sees the same data: nothing lives only in memory.
    let reopened = JsonFileRepository::new(repo.path());
    assert_eq!(reopened.detail(1).await.unwrap(), added);
  }

  #[tokio::test]
  async fn update_is_persisted_to_disk() {
    let dir  = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    std::fs::write(&path, r#"[{"id":1,"name":"A","no_telp":"1"}]"#).unwrap();

    let repo    = JsonFileRepository::new(&path);
    let updated = repo.update(1, ContactInput::new("B", "2")).await.unwrap();
    assert_eq!(updated, Contact { id: 1, name: "B".into(), phone: "2".into() });

    let on_disk: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
      on_disk,
      serde_json::json!([{ "id": 1, "name": "B", "no_telp": "2" }])
    );
  }

  #[tokio::test]
  async fn ids_follow_max_plus_one_from_file() {
    let dir  = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    std::fs::write(
      &path,
      r#"[{"id":1,"name":"a","no_telp":"1"},{"id":7,"name":"b","no_telp":"2"}]"#,
    )
    .unwrap();

    let repo = JsonFileRepository::new(&path);
    assert_eq!(repo.add(ContactInput::new("c", "3")).await.unwrap().id, 8);
  }

  #[tokio::test]
  async fn delete_then_detail_is_not_found() {
    let dir  = TempDir::new().unwrap();
    let repo = repo_in(&dir);
    let a    = repo.add(ContactInput::new("a", "1")).await.unwrap();
    let b    = repo.add(ContactInput::new("b", "2")).await.unwrap();

    repo.delete(a.id).await.unwrap();
    assert!(matches!(repo.detail(a.id).await, Err(Error::NotFound(1))));
    assert_eq!(repo.list().await.unwrap(), vec![b]);
  }

  #[tokio::test]
  async fn missing_id_is_not_found_and_file_untouched() {
    let dir  = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    let raw  = r#"[{"id":1,"name":"A","no_telp":"1"}]"#;
    std::fs::write(&path, raw).unwrap();

    let repo = JsonFileRepository::new(&path);
    assert!(matches!(
      repo.update(2, ContactInput::new("x", "y")).await,
      Err(Error::NotFound(2))
    ));
    assert!(matches!(repo.delete(2).await, Err(Error::NotFound(2))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
  }

  #[tokio::test]
  async fn malformed_file_is_format_error() {
    let dir  = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    std::fs::write(&path, "{not json").unwrap();

    let repo = JsonFileRepository::new(&path);
    assert!(matches!(repo.list().await, Err(Error::Format(_))));
  }

  #[tokio::test]
  async fn duplicate_or_non_positive_ids_are_format_errors() {
    let dir  = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    let repo = JsonFileRepository::new(&path);

    std::fs::write(
      &path,
      r#"[{"id":2,"name":"a","no_telp":"1"},{"id":2,"name":"b","no_telp":"2"}]"#,
    )
    .unwrap();
    assert!(matches!(repo.detail(2).await, Err(Error::Format(_))));

    std::fs::write(&path, r#"[{"id":0,"name":"a","no_telp":"1"}]"#).unwrap();
    assert!(matches!(repo.list().await, Err(Error::Format(_))));
  }

  #[tokio::test]
  async fn add_after_max_id_fails_and_leaves_file_untouched() {
    let dir  = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    let raw  = r#"[{"id":9223372036854775807,"name":"a","no_telp":"1"}]"#;
    std::fs::write(&path, raw).unwrap();

    let repo = JsonFileRepository::new(&path);
    assert!(matches!(
      repo.add(ContactInput::new("b", "2")).await,
      Err(Error::IdsExhausted(i64::MAX))
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_adds_get_distinct_ids() {
    const N: i64 = 16;

    let dir  = TempDir::new().unwrap();
    let repo = Arc::new(repo_in(&dir));

    let tasks: Vec<_> = (0..N)
      .map(|i| {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move {
          repo.add(ContactInput::new(format!("c{i}"), "1")).await.unwrap().id
        })
      })
      .collect();

    let mut ids = Vec::new();
    for task in tasks {
      ids.push(task.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=N).collect::<Vec<_>>());

    let on_disk: Vec<Contact> =
      serde_json::from_slice(&std::fs::read(repo.path()).unwrap()).unwrap();
    assert_eq!(on_disk.len(), N as usize);
  }

  #[tokio::test]
  async fn unreadable_path_is_storage_error() {
    let dir  = TempDir::new().unwrap();
    // A directory where the file should be cannot be read as a file.
    let repo = JsonFileRepository::new(dir.path());
    assert!(matches!(repo.list().await, Err(Error::Storage(_))));
  }
}
