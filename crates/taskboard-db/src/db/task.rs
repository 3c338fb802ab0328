use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use taskboard_core::{
    models::{CreateTaskRequest, Task, TaskWithUsers, User},
    AppError,
};

/// Flat row for task queries that join the author and assignee. The joined
/// user columns are nullable because of the LEFT JOINs.
#[derive(sqlx::FromRow)]
pub(crate) struct TaskUserRow {
    task_id: i32,
    title: String,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    tags: Option<String>,
    start_date: Option<DateTime<Utc>>,
    due_date: Option<DateTime<Utc>>,
    points: Option<i32>,
    project_id: i32,
    author_user_id: i32,
    assigned_user_id: Option<i32>,
    author_id: Option<i32>,
    author_cognito_id: Option<String>,
    author_username: Option<String>,
    author_profile_image_url: Option<String>,
    author_team_id: Option<i32>,
    assignee_id: Option<i32>,
    assignee_cognito_id: Option<String>,
    assignee_username: Option<String>,
    assignee_profile_image_url: Option<String>,
    assignee_team_id: Option<i32>,
}

impl From<TaskUserRow> for TaskWithUsers {
    fn from(row: TaskUserRow) -> Self {
        let author = row.author_id.map(|user_id| User {
            user_id,
            cognito_id: row.author_cognito_id.unwrap_or_default(),
            username: row.author_username.unwrap_or_default(),
            profile_image_url: row.author_profile_image_url,
            team_id: row.author_team_id,
        });
        let assignee = row.assignee_id.map(|user_id| User {
            user_id,
            cognito_id: row.assignee_cognito_id.unwrap_or_default(),
            username: row.assignee_username.unwrap_or_default(),
            profile_image_url: row.assignee_profile_image_url,
            team_id: row.assignee_team_id,
        });
        TaskWithUsers {
            task: Task {
                task_id: row.task_id,
                title: row.title,
                description: row.description,
                status: row.status,
                priority: row.priority,
                tags: row.tags,
                start_date: row.start_date,
                due_date: row.due_date,
                points: row.points,
                project_id: row.project_id,
                author_user_id: row.author_user_id,
                assigned_user_id: row.assigned_user_id,
            },
            author,
            assignee,
        }
    }
}

/// Repository for tasks
#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a project's tasks with author/assignee resolved.
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select"))]
    pub async fn list_by_project(&self, project_id: i32) -> Result<Vec<TaskWithUsers>, AppError> {
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
            WHERE t.project_id = $1
            ORDER BY t.task_id ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskWithUsers::from).collect())
    }

    /// Tasks the user authored or is assigned to.
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "select", db.record_id = user_id))]
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<TaskWithUsers>, AppError> {
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
            WHERE t.author_user_id = $1 OR t.assigned_user_id = $1
            ORDER BY t.task_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskWithUsers::from).collect())
    }

    #[tracing::instrument(skip(self, task), fields(db.table = "tasks", db.operation = "insert"))]
    pub async fn create_task(&self, task: &CreateTaskRequest) -> Result<Task, AppError> {
        let created = sqlx::query_as::<Postgres, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, tags, start_date, due_date,
                               points, project_id, author_user_id, assigned_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING task_id, title, description, status, priority, tags, start_date, due_date,
                      points, project_id, author_user_id, assigned_user_id
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(&task.tags)
        .bind(task.start_date)
        .bind(task.due_date)
        .bind(task.points)
        .bind(task.project_id)
        .bind(task.author_user_id)
        .bind(task.assigned_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a task's status. A missing task surfaces as `RowNotFound`,
    /// which the classifier reports as 404 "Record not found".
    #[tracing::instrument(skip(self), fields(db.table = "tasks", db.operation = "update", db.record_id = task_id))]
    pub async fn update_status(&self, task_id: i32, status: &str) -> Result<Task, AppError> {
        let updated = sqlx::query_as::<Postgres, Task>(
            r#"
            UPDATE tasks SET status = $2
            WHERE task_id = $1
            RETURNING task_id, title, description, status, priority, tags, start_date, due_date,
                      points, project_id, author_user_id, assigned_user_id
            "#,
        )
        .bind(task_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }
}
