//! [`SqliteRepository`] — the SQLite implementation of [`ContactRepository`].

use std::{path::Path, time::Duration};

use phonebook_core::{Contact, ContactInput, ContactRepository, Error as CoreError};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, schema::SCHEMA};

/// Upper bound on a single repository call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ─── Repository ──────────────────────────────────────────────────────────────

/// A contact repository backed by a single SQLite file.
///
/// Clones share the underlying connection.
#[derive(Clone)]
pub struct SqliteRepository {
  conn:    tokio_rusqlite::Connection,
  timeout: Duration,
}

impl SqliteRepository {
  /// Open (or create) a database at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let repo = Self { conn, timeout };
    repo.init_schema().await?;
    Ok(repo)
  }

  /// Open a private in-memory database.
  pub async fn open_in_memory(timeout: Duration) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let repo = Self { conn, timeout };
    repo.init_schema().await?;
    Ok(repo)
  }

  pub fn timeout(&self) -> Duration { self.timeout }

  /// Replace the per-call timeout.
  pub fn with_timeout(self, timeout: Duration) -> Self { Self { timeout, ..self } }

  async fn init_schema(&self) -> Result<()> {
    self
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Run `function` on the connection thread, giving up after `self.timeout`.
  ///
  /// A timeout only releases the caller. The closure still runs to completion
  /// on the connection thread, and later calls queue behind it.
  pub(crate) async fn call<F, R>(&self, function: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R> + Send + 'static,
    R: Send + 'static,
  {
    match tokio::time::timeout(self.timeout, self.conn.call(function)).await {
      Ok(result) => Ok(result?),
      Err(_) => {
        tracing::warn!(timeout = ?self.timeout, "sqlite: operation timed out");
        Err(Error::Timeout(self.timeout))
      }
    }
  }
}

fn row_to_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
  Ok(Contact {
    id:    row.get(0)?,
    name:  row.get(1)?,
    phone: row.get(2)?,
  })
}

// ─── ContactRepository impl ──────────────────────────────────────────────────

impl ContactRepository for SqliteRepository {
  async fn list(&self) -> phonebook_core::Result<Vec<Contact>> {
    let contacts = self
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name, no_telp FROM contact ORDER BY id ASC")?;
        let rows = stmt
          .query_map([], row_to_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(contacts)
  }

  async fn add(&self, input: ContactInput) -> phonebook_core::Result<Contact> {
    let name  = input.name.clone();
    let phone = input.phone.clone();

    let id: i64 = self
      .call(move |conn| {
        let mut stmt = conn
          .prepare("INSERT INTO contact (name, no_telp) VALUES (?1, ?2) RETURNING id")?;
        Ok(stmt.query_row(rusqlite::params![name, phone], |row| row.get(0))?)
      })
      .await?;

    tracing::debug!(id, "sqlite: added contact");
    Ok(Contact::new(id, input))
  }

  async fn detail(&self, id: i64) -> phonebook_core::Result<Contact> {
    let contact: Option<Contact> = self
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT id, name, no_telp FROM contact WHERE id = ?1 LIMIT 1")?;
        Ok(stmt.query_row(rusqlite::params![id], row_to_contact).optional()?)
      })
      .await?;

    contact.ok_or(CoreError::NotFound(id))
  }

  async fn update(
    &self,
    id:    i64,
    input: ContactInput,
  ) -> phonebook_core::Result<Contact> {
    let ContactInput { name, phone } = input;

    let contact: Option<Contact> = self
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "UPDATE contact SET name = ?1, no_telp = ?2 WHERE id = ?3
           RETURNING id, name, no_telp",
        )?;
        Ok(
          stmt
            .query_row(rusqlite::params![name, phone, id], row_to_contact)
            .optional()?,
        )
      })
      .await?;

    let contact = contact.ok_or(CoreError::NotFound(id))?;
    tracing::debug!(id, "sqlite: updated contact");
    Ok(contact)
  }

  async fn delete(&self, id: i64) -> phonebook_core::Result<()> {
    let affected: usize = self
      .call(move |conn| {
        let mut stmt = conn.prepare("DELETE FROM contact WHERE id = ?1")?;
        Ok(stmt.execute(rusqlite::params![id])?)
      })
      .await?;

    if affected == 0 {
      return Err(CoreError::NotFound(id));
    }
    tracing::debug!(id, "sqlite: deleted contact");
    Ok(())
  }
}
