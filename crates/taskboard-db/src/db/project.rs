use sqlx::{PgPool, Postgres};
use taskboard_core::{
    models::{CreateProjectRequest, Project},
    AppError,
};

/// Repository for projects
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "projects", db.operation = "select"))]
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<Postgres, Project>(
            "SELECT project_id, name, description, start_date, end_date FROM projects ORDER BY project_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    #[tracing::instrument(skip(self, project), fields(db.table = "projects", db.operation = "insert"))]
    pub async fn create_project(&self, project: &CreateProjectRequest) -> Result<Project, AppError> {
        let created = sqlx::query_as::<Postgres, Project>(
            r#"
            INSERT INTO projects (name, description, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING project_id, name, description, start_date, end_date
            "#,
        )
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
