use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use taskboard_core::{
    models::{SearchRequest, SearchResults},
    ApiSuccess, AppError, ErrorBody,
};

use crate::error::HttpAppError;
use crate::state::AppState;

/// Search tasks, projects and users
///
/// The term is matched case-insensitively as a substring against task
/// titles/descriptions, project names/descriptions and usernames. The three
/// lookups are independent and run concurrently; all three result sets are
/// returned together even when some are empty.
#[utoipa::path(
    post,
    path = "/search",
    params(SearchRequest),
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matches across tasks, projects and users", body = SearchResults),
        (status = 400, description = "Empty or missing query", body = ErrorBody)
    ),
    tag = "search"
)]
#[tracing::instrument(skip(state, body))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchRequest>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    // The query is accepted in the JSON body or the query string.
    let raw = match body.ok().and_then(|Json(request)| request.query).or(params.query) {
        Some(query) => query,
        None => return Err(AppError::bad_request("Search query is required").into()),
    };

    let term = raw.trim();
    if term.is_empty() {
        return Err(AppError::bad_request("Search query cannot be empty").into());
    }

    let (tasks, projects, users) = tokio::try_join!(
        state.search.search_tasks(term),
        state.search.search_projects(term),
        state.search.search_users(term),
    )?;

    Ok(Json(ApiSuccess::new(SearchResults {
        tasks,
        projects,
        users,
    })))
}
