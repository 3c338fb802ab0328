//! Application state shared across handlers.

use sqlx::PgPool;
use taskboard_core::Config;
use taskboard_db::{
    ProjectRepository, SearchRepository, TaskRepository, TeamRepository, UserRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub users: UserRepository,
    pub teams: TeamRepository,
    pub projects: ProjectRepository,
    pub tasks: TaskRepository,
    pub search: SearchRepository,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            projects: ProjectRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool.clone()),
            search: SearchRepository::new(pool.clone()),
            config,
            pool,
        }
    }
}
