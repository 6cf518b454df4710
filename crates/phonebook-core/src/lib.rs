//! Core types and trait definitions for the phonebook.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`repository::ContactRepository`]; presentation
//! layers talk to a [`usecase::ContactUsecase`] wrapping one of them.

pub mod contact;
pub mod error;
pub mod repository;
pub mod usecase;

pub use contact::{Contact, ContactInput};
pub use error::{Error, Result};
pub use repository::ContactRepository;
pub use usecase::ContactUsecase;
