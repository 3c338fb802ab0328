use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use taskboard_core::{
    models::{CreateTeamRequest, Team, TeamWithUsernames},
    ApiSuccess, ErrorBody,
};

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// List teams with owner/manager usernames resolved
#[utoipa::path(
    get,
    path = "/teams",
    responses(
        (status = 200, description = "All teams", body = [TeamWithUsernames]),
        (status = 500, description = "Database failure", body = ErrorBody)
    ),
    tag = "teams"
)]
#[tracing::instrument(skip(state))]
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let teams = state.teams.list_teams().await?;
    Ok(Json(ApiSuccess::new(teams)))
}

/// Create a team
#[utoipa::path(
    post,
    path = "/teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid request body", body = ErrorBody)
    ),
    tag = "teams"
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let team = state.teams.create_team(&request).await?;
    Ok((StatusCode::CREATED, Json(ApiSuccess::new(team))))
}
