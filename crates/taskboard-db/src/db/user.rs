use sqlx::{PgPool, Postgres};
use taskboard_core::{
    models::{NewUser, User},
    AppError,
};

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<Postgres, User>(
            "SELECT user_id, cognito_id, username, profile_image_url, team_id FROM users ORDER BY user_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Fetch a user by Cognito id, `None` when no such user exists.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_by_cognito_id(&self, cognito_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT user_id, cognito_id, username, profile_image_url, team_id FROM users WHERE cognito_id = $1",
        )
        .bind(cognito_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Existence pre-flight used before inserting rows that reference a user.
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = user_id))]
    pub async fn user_exists(&self, user_id: i32) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self, user), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let created = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (cognito_id, username, profile_image_url, team_id)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, cognito_id, username, profile_image_url, team_id
            "#,
        )
        .bind(&user.cognito_id)
        .bind(&user.username)
        .bind(&user.profile_image_url)
        .bind(user.team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
