//! Taskboard database access
//!
//! Repositories execute queries against PostgreSQL and surface typed
//! failures: every sqlx error crosses the boundary as a
//! `taskboard_core::PersistenceError` via `?`, so classification happens in
//! one place.

pub mod db;

pub use db::{ProjectRepository, SearchRepository, TaskRepository, TeamRepository, UserRepository};
