use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User account, keyed externally by its Cognito id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i32,
    pub cognito_id: String,
    pub username: String,
    pub profile_image_url: Option<String>,
    pub team_id: Option<i32>,
}

/// Payload for `POST /users`.
///
/// `username` and `cognito_id` are optional here so missing values surface as
/// a validation failure in the response envelope rather than a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub cognito_id: Option<String>,
    pub profile_image_url: Option<String>,
    pub team_id: Option<i32>,
}

/// Validated insert payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub cognito_id: String,
    pub profile_image_url: Option<String>,
    pub team_id: Option<i32>,
}
