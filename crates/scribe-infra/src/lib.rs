//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains the SeaORM/PostgreSQL repositories, in-memory
//! fallbacks, and the authentication services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::{DatabaseConfig, connect};
pub use database::memory::{InMemoryGroupRepository, InMemoryPostRepository, InMemoryUserRepository};
pub use database::postgres::{PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository};
