use sqlx::{PgPool, Postgres};
use taskboard_core::{
    models::{Project, TaskWithUsers, User},
    AppError,
};

use super::task::TaskUserRow;

/// Read-only repository backing the cross-entity search fan-out.
///
/// Each lookup is an independent case-insensitive substring match; the three
/// have no ordering dependency and callers may run them concurrently.
#[derive(Clone)]
pub struct SearchRepository {
    pool: PgPool,
}

impl SearchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select"))]
    pub async fn search_tasks(&self, term: &str) -> Result<Vec<TaskWithUsers>, AppError> {
        let pattern = like_pattern(term);
        let rows = sqlx::query_as::<Postgres, TaskUserRow>(
            r#"
            SELECT t.task_id, t.title, t.description, t.status, t.priority, t.tags,
                   t.start_date, t.due_date, t.points, t.project_id, t.author_user_id, t.assigned_user_id,
                   a.user_id AS author_id, a.cognito_id AS author_cognito_id, a.username AS author_username,
                   a.profile_image_url AS author_profile_image_url, a.team_id AS author_team_id,
                   s.user_id AS assignee_id, s.cognito_id AS assignee_cognito_id, s.username AS assignee_username,
                   s.profile_image_url AS assignee_profile_image_url, s.team_id AS assignee_team_id
            FROM tasks t
            LEFT JOIN users a ON a.user_id = t.author_user_id
            LEFT JOIN users s ON s.user_id = t.assigned_user_id
            WHERE t.title ILIKE $1 OR t.description ILIKE $1
            ORDER BY t.task_id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskWithUsers::from).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "select"))]
    pub async fn search_projects(&self, term: &str) -> Result<Vec<Project>, AppError> {
        let pattern = like_pattern(term);
        let projects = sqlx::query_as::<Postgres, Project>(
            r#"
            SELECT project_id, name, description, start_date, end_date
            FROM projects
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY project_id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn search_users(&self, term: &str) -> Result<Vec<User>, AppError> {
        let pattern = like_pattern(term);
        let users = sqlx::query_as::<Postgres, User>(
            r#"
            SELECT user_id, cognito_id, username, profile_image_url, team_id
            FROM users
            WHERE username ILIKE $1
            ORDER BY user_id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

/// Build a substring ILIKE pattern, escaping the wildcard characters in the
/// user's term so they match literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("kanban"), "%kanban%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
