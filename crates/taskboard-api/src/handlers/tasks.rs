use std::sync::Arc;

use axum::{
    extract::rejection::QueryRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use taskboard_core::{
    models::{CreateTaskRequest, Task, TaskListQuery, TaskWithUsers, UpdateTaskStatusRequest},
    ApiSuccess, AppError, ErrorBody,
};

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// List a project's tasks
#[utoipa::path(
    get,
    path = "/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Tasks of the project", body = [TaskWithUsers]),
        (status = 400, description = "Missing projectId", body = ErrorBody)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state))]
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TaskListQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Query(query) =
        query.map_err(|_| AppError::bad_request("projectId must be an integer"))?;
    let Some(project_id) = query.project_id else {
        return Err(AppError::bad_request("projectId query parameter is required").into());
    };

    let tasks = state.tasks.list_by_project(project_id).await?;
    Ok(Json(ApiSuccess::new(tasks)))
}

/// Create a task
///
/// The referenced author (and assignee, when given) must already exist; a
/// dangling reference is rejected before anything is written.
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Unknown author or assignee", body = ErrorBody)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Verify the author exists
    if !state.users.user_exists(request.author_user_id).await? {
        return Err(AppError::bad_request(format!(
            "Author with userId {} does not exist",
            request.author_user_id
        ))
        .into());
    }

    // Verify the assignee exists (if provided)
    if let Some(assigned_user_id) = request.assigned_user_id {
        if !state.users.user_exists(assigned_user_id).await? {
            return Err(AppError::bad_request(format!(
                "Assignee with userId {} does not exist",
                assigned_user_id
            ))
            .into());
        }
    }

    let task = state.tasks.create_task(&request).await?;
    Ok((StatusCode::CREATED, Json(ApiSuccess::new(task))))
}

/// Update a task's status
#[utoipa::path(
    patch,
    path = "/tasks/{task_id}",
    params(("task_id" = i32, Path, description = "Task to update")),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 404, description = "No such task", body = ErrorBody)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state))]
pub async fn update_task_status(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateTaskStatusRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let task = state.tasks.update_status(task_id, &request.status).await?;
    Ok(Json(ApiSuccess::new(task)))
}

/// List the tasks a user authored or is assigned to
#[utoipa::path(
    get,
    path = "/tasks/user/{user_id}",
    params(("user_id" = i32, Path, description = "User whose tasks to list")),
    responses(
        (status = 200, description = "Tasks for the user", body = [TaskWithUsers]),
        (status = 500, description = "Database failure", body = ErrorBody)
    ),
    tag = "tasks"
)]
#[tracing::instrument(skip(state))]
pub async fn list_user_tasks(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, HttpAppError> {
    let tasks = state.tasks.list_for_user(user_id).await?;
    Ok(Json(ApiSuccess::new(tasks)))
}
