//! # Scribe Shared
//!
//! Types shared between the web server and the presentation collaborator.
//! Handlers emit these payloads; the external template layer renders them.

pub mod context;
pub mod dto;
pub mod response;

pub use context::RenderedPage;
pub use response::{ApiResponse, ErrorResponse};
