//! [`Backend`] — the storage choice, resolved once from configuration.

use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use phonebook_core::{Contact, ContactInput, ContactRepository, Result};
use phonebook_store_local::{ContactBook, JsonFileRepository, MemoryRepository};
use phonebook_store_sqlite::SqliteRepository;

use crate::settings::{AppConfig, StorageKind};

pub enum Backend {
  Memory(MemoryRepository),
  Json(JsonFileRepository),
  Sqlite(SqliteRepository),
}

impl Backend {
  /// Build the repository named by `cfg.storage`. Opening the SQL database
  /// happens here, so a bad path fails start-up rather than the first call.
  pub async fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
    let backend = match cfg.storage {
      StorageKind::Memory => {
        let book = Arc::new(Mutex::new(ContactBook::new()));
        Backend::Memory(MemoryRepository::new(book))
      }
      StorageKind::Json => Backend::Json(JsonFileRepository::new(&cfg.json_path)),
      StorageKind::Sql => {
        let url = cfg
          .db
          .url
          .as_deref()
          .context("database URL not found (set db.url)")?;
        let repo = SqliteRepository::open(url, cfg.db.timeout())
          .await
          .with_context(|| format!("failed to open database at {url:?}"))?;
        Backend::Sqlite(repo)
      }
    };
    Ok(backend)
  }

  pub fn name(&self) -> &'static str {
    match self {
      Backend::Memory(_) => "memory",
      Backend::Json(_) => "json",
      Backend::Sqlite(_) => "sql",
    }
  }
}

impl ContactRepository for Backend {
  async fn list(&self) -> Result<Vec<Contact>> {
    match self {
      Backend::Memory(r) => r.list().await,
      Backend::Json(r) => r.list().await,
      Backend::Sqlite(r) => r.list().await,
    }
  }

  async fn add(&self, input: ContactInput) -> Result<Contact> {
    match self {
      Backend::Memory(r) => r.add(input).await,
      Backend::Json(r) => r.add(input).await,
      Backend::Sqlite(r) => r.add(input).await,
    }
  }

  async fn detail(&self, id: i64) -> Result<Contact> {
    match self {
      Backend::Memory(r) => r.detail(id).await,
      Backend::Json(r) => r.detail(id).await,
      Backend::Sqlite(r) => r.detail(id).await,
    }
  }

  async fn update(&self, id: i64, input: ContactInput) -> Result<Contact> {
    match self {
      Backend::Memory(r) => r.update(id, input).await,
      Backend::Json(r) => r.update(id, input).await,
      Backend::Sqlite(r) => r.update(id, input).await,
    }
  }

  async fn delete(&self, id: i64) -> Result<()> {
    match self {
      Backend::Memory(r) => r.delete(id).await,
      Backend::Json(r) => r.delete(id).await,
      Backend::Sqlite(r) => r.delete(id).await,
    }
  }
}

#[cfg(test)]
mod tests {
  use phonebook_core::Error;
  use tempfile::TempDir;

  use super::*;
  use crate::settings::DatabaseConfig;

  async fn exercise(backend: &Backend) {
    assert!(backend.list().await.unwrap().is_empty());

    let added = backend.add(ContactInput::new("bagas", "0984738")).await.unwrap();
    assert_eq!(backend.detail(added.id).await.unwrap(), added);

    let updated = backend
      .update(added.id, ContactInput::new("arbi", "111"))
      .await
      .unwrap();
    assert_eq!(updated.id, added.id);

    backend.delete(added.id).await.unwrap();
    assert!(matches!(backend.detail(added.id).await, Err(Error::NotFound(_))));
  }

  #[tokio::test]
  async fn memory_backend() {
    let backend = Backend::from_config(&AppConfig::default()).await.unwrap();
    assert_eq!(backend.name(), "memory");
    exercise(&backend).await;
  }

  #[tokio::test]
  async fn json_backend() {
    let dir = TempDir::new().unwrap();
    let cfg = AppConfig {
      storage:   StorageKind::Json,
      json_path: dir.path().join("contact.json"),
      ..AppConfig::default()
    };
    let backend = Backend::from_config(&cfg).await.unwrap();
    assert_eq!(backend.name(), "json");
    exercise(&backend).await;
  }

  #[tokio::test]
  async fn sql_backend() {
    let dir = TempDir::new().unwrap();
    let cfg = AppConfig {
      storage: StorageKind::Sql,
      db: DatabaseConfig {
        url: Some(dir.path().join("contact.db").to_string_lossy().into_owned()),
        ..DatabaseConfig::default()
      },
      ..AppConfig::default()
    };
    let backend = Backend::from_config(&cfg).await.unwrap();
    assert_eq!(backend.name(), "sql");
    exercise(&backend).await;
  }

  #[tokio::test]
  async fn sql_backend_without_url_fails() {
    let cfg = AppConfig { storage: StorageKind::Sql, ..AppConfig::default() };
    assert!(Backend::from_config(&cfg).await.is_err());
  }
}
