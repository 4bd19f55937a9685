//! # Scribe Core
//!
//! The domain layer of the Scribe blogging service.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod form;
pub mod pagination;
pub mod ports;

pub use error::RepoError;
