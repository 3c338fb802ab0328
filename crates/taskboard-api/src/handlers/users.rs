use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use taskboard_core::{
    models::{CreateUserRequest, NewUser, User},
    ApiSuccess, AppError, ErrorBody,
};

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Database failure", body = ErrorBody)
    ),
    tag = "users"
)]
#[tracing::instrument(skip(state))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let users = state.users.list_users().await?;
    Ok(Json(ApiSuccess::new(users)))
}

/// Fetch a user by Cognito id
#[utoipa::path(
    get,
    path = "/users/{cognito_id}",
    params(("cognito_id" = String, Path, description = "Cognito id of the user")),
    responses(
        (status = 200, description = "The user, or null when unknown", body = User),
        (status = 500, description = "Database failure", body = ErrorBody)
    ),
    tag = "users"
)]
#[tracing::instrument(skip(state))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(cognito_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let user = state.users.get_by_cognito_id(&cognito_id).await?;

    // An unknown id answers 200 with data: null rather than 404.
    Ok(Json(ApiSuccess::new(user)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing username or Cognito id", body = ErrorBody),
        (status = 409, description = "Username or Cognito id already taken", body = ErrorBody)
    ),
    tag = "users"
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (username, cognito_id) = match (request.username, request.cognito_id) {
        (Some(username), Some(cognito_id)) if !username.is_empty() && !cognito_id.is_empty() => {
            (username, cognito_id)
        }
        _ => {
            return Err(AppError::bad_request("Username and Cognito ID are required").into());
        }
    };

    let user = state
        .users
        .create_user(NewUser {
            username,
            cognito_id,
            profile_image_url: request.profile_image_url,
            team_id: request.team_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiSuccess::new(user))))
}
