//! Process-local storage backends for the phonebook.
//!
//! - [`MemoryRepository`] keeps contacts in an injected [`ContactBook`] for
//!   the lifetime of the process.
//! - [`JsonFileRepository`] persists the whole collection as a JSON array and
//!   rewrites the file on every mutation.

mod json;
mod memory;

pub use json::JsonFileRepository;
pub use memory::{ContactBook, MemoryRepository};
