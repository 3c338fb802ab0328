use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use taskboard_core::{
    models::{CreateProjectRequest, Project},
    ApiSuccess, ErrorBody,
};

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// List all projects
#[utoipa::path(
    get,
    path = "/projects",
    responses(
        (status = 200, description = "All projects", body = [Project]),
        (status = 500, description = "Database failure", body = ErrorBody)
    ),
    tag = "projects"
)]
#[tracing::instrument(skip(state))]
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let projects = state.projects.list_projects().await?;
    Ok(Json(ApiSuccess::new(projects)))
}

/// Create a project
#[utoipa::path(
    post,
    path = "/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Invalid request body", body = ErrorBody)
    ),
    tag = "projects"
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let project = state.projects.create_project(&request).await?;
    Ok((StatusCode::CREATED, Json(ApiSuccess::new(project))))
}
