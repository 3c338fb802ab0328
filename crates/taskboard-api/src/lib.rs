//! Taskboard API Library
//!
//! This crate provides the HTTP handlers, response emission, and application
//! setup for the Taskboard service.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{HttpAppError, ValidatedJson};
pub use state::AppState;
