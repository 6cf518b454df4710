//! Contact — the single record the phonebook stores.
//!
//! Validation lives here as free helpers but is invoked by the presentation
//! adapters only. Neither the entity nor the usecase layer enforces it.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A persisted contact. The `id` is assigned by the storage backend and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:    i64,
  pub name:  String,
  #[serde(rename = "no_telp")]
  pub phone: String,
}

impl Contact {
  pub fn new(id: i64, input: ContactInput) -> Self {
    Self { id, name: input.name, phone: input.phone }
  }

  /// Overwrite the mutable fields; `id` is left untouched.
  pub fn apply(&mut self, input: ContactInput) {
    self.name  = input.name;
    self.phone = input.phone;
  }
}

/// The caller-supplied half of a contact, used by Add and Update.
///
/// Missing fields deserialise as empty strings so that they surface as
/// validation errors rather than decode errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
  #[serde(default)]
  pub name:  String,
  #[serde(default, rename = "no_telp")]
  pub phone: String,
}

impl ContactInput {
  pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
    Self { name: name.into(), phone: phone.into() }
  }

  /// Reject empty names and phone numbers. No other format rules apply.
  pub fn validate(&self) -> Result<()> {
    if self.name.is_empty() {
      return Err(Error::InvalidName);
    }
    if self.phone.is_empty() {
      return Err(Error::InvalidPhone);
    }
    Ok(())
  }
}

/// Parse a contact id as typed by a user or taken from a URL path segment.
/// Only strictly positive integers are accepted, with no surrounding
/// whitespace.
pub fn parse_id(raw: &str) -> Result<i64> {
  match raw.parse::<i64>() {
    Ok(id) if id > 0 => Ok(id),
    _ => Err(Error::InvalidId(raw.to_owned())),
  }
}
