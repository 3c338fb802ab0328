use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::project::Project;
use crate::models::task::TaskWithUsers;
use crate::models::user::User;

/// Search input, accepted in the request body or the query string.
#[derive(Debug, Default, Clone, Deserialize, ToSchema, IntoParams)]
#[serde(default)]
pub struct SearchRequest {
    pub query: Option<String>,
}

/// The three result sets of a search, each independently filtered.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResults {
    pub tasks: Vec<TaskWithUsers>,
    pub projects: Vec<Project>,
    pub users: Vec<User>,
}
