//! Domain route groups.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{projects, search, tasks, teams, users};
use crate::state::AppState;

pub fn domain_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/{cognito_id}", get(users::get_user))
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/{task_id}", patch(tasks::update_task_status))
        .route("/tasks/user/{user_id}", get(tasks::list_user_tasks))
        .route("/search", post(search::search))
        .with_state(state)
}
