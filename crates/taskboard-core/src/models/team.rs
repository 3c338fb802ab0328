use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub team_id: i32,
    pub team_name: String,
    pub product_owner_user_id: Option<i32>,
    pub project_manager_user_id: Option<i32>,
}

/// Team listing row with the owner/manager usernames resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TeamWithUsernames {
    pub team_id: i32,
    pub team_name: String,
    pub product_owner_user_id: Option<i32>,
    pub project_manager_user_id: Option<i32>,
    pub product_owner_username: Option<String>,
    pub project_manager_username: Option<String>,
}

/// Payload for `POST /teams`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub team_name: String,
    pub product_owner_user_id: Option<i32>,
    pub project_manager_user_id: Option<i32>,
}
