//! Database repositories for data access layer
//!
//! Each repository is responsible for a single entity and provides the CRUD
//! operations and lookups the handlers need. Repositories hold a cloned
//! `PgPool` and are cheap to clone into application state.

pub mod project;
pub mod search;
pub mod task;
pub mod team;
pub mod user;

pub use project::ProjectRepository;
pub use search::SearchRepository;
pub use task::TaskRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
