use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub points: Option<i32>,
    pub project_id: i32,
    pub author_user_id: i32,
    pub assigned_user_id: Option<i32>,
}

/// Task read model with the author and assignee records resolved.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithUsers {
    #[serde(flatten)]
    pub task: Task,
    pub author: Option<User>,
    pub assignee: Option<User>,
}

/// Payload for `POST /tasks`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub tags: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub points: Option<i32>,
    pub project_id: i32,
    pub author_user_id: i32,
    pub assigned_user_id: Option<i32>,
}

/// Payload for `PATCH /tasks/{task_id}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateTaskStatusRequest {
    pub status: String,
}

/// Query parameters for `GET /tasks`.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskListQuery {
    pub project_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_with_camel_case_keys() {
        let task = Task {
            task_id: 1,
            title: "Ship it".to_string(),
            description: None,
            status: Some("To Do".to_string()),
            priority: None,
            tags: None,
            start_date: None,
            due_date: None,
            points: Some(3),
            project_id: 7,
            author_user_id: 2,
            assigned_user_id: None,
        };
        let json = serde_json::to_value(&task).expect("serialize");
        assert_eq!(json["taskId"], serde_json::json!(1));
        assert_eq!(json["projectId"], serde_json::json!(7));
        assert_eq!(json["authorUserId"], serde_json::json!(2));
        assert!(json.get("task_id").is_none());
    }

    #[test]
    fn test_task_with_users_flattens_task_fields() {
        let task = Task {
            task_id: 5,
            title: "Review".to_string(),
            description: None,
            status: None,
            priority: None,
            tags: None,
            start_date: None,
            due_date: None,
            points: None,
            project_id: 1,
            author_user_id: 9,
            assigned_user_id: None,
        };
        let with_users = TaskWithUsers {
            task,
            author: Some(User {
                user_id: 9,
                cognito_id: "abc".to_string(),
                username: "alice".to_string(),
                profile_image_url: None,
                team_id: None,
            }),
            assignee: None,
        };
        let json = serde_json::to_value(&with_users).expect("serialize");
        assert_eq!(json["taskId"], serde_json::json!(5));
        assert_eq!(json["author"]["username"], serde_json::json!("alice"));
        assert_eq!(json["assignee"], serde_json::Value::Null);
    }
}
