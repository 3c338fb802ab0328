use sqlx::{PgPool, Postgres};
use taskboard_core::{
    models::{CreateTeamRequest, Team, TeamWithUsernames},
    AppError,
};

/// Repository for teams
#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List teams with the product owner and project manager usernames
    /// resolved from the users table.
    #[tracing::instrument(skip(self), fields(db.table = "teams", db.operation = "select"))]
    pub async fn list_teams(&self) -> Result<Vec<TeamWithUsernames>, AppError> {
        let teams = sqlx::query_as::<Postgres, TeamWithUsernames>(
            r#"
            SELECT tm.team_id, tm.team_name, tm.product_owner_user_id, tm.project_manager_user_id,
                   po.username AS product_owner_username,
                   pm.username AS project_manager_username
            FROM teams tm
            LEFT JOIN users po ON po.user_id = tm.product_owner_user_id
            LEFT JOIN users pm ON pm.user_id = tm.project_manager_user_id
            ORDER BY tm.team_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    #[tracing::instrument(skip(self, team), fields(db.table = "teams", db.operation = "insert"))]
    pub async fn create_team(&self, team: &CreateTeamRequest) -> Result<Team, AppError> {
        let created = sqlx::query_as::<Postgres, Team>(
            r#"
            INSERT INTO teams (team_name, product_owner_user_id, project_manager_user_id)
            VALUES ($1, $2, $3)
            RETURNING team_id, team_name, product_owner_user_id, project_manager_user_id
            "#,
        )
        .bind(&team.team_name)
        .bind(team.product_owner_user_id)
        .bind(team.project_manager_user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
