//! OpenAPI documentation aggregation.

use taskboard_core::models::{
    CreateProjectRequest, CreateTaskRequest, CreateTeamRequest, CreateUserRequest, Project,
    SearchRequest, SearchResults, Task, TaskWithUsers, Team, TeamWithUsernames,
    UpdateTaskStatusRequest, User,
};
use taskboard_core::{ErrorBody, ErrorDebug};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taskboard API",
        description = "Project management backend: projects, tasks, teams, users and cross-entity search."
    ),
    paths(
        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::create_user,
        crate::handlers::teams::list_teams,
        crate::handlers::teams::create_team,
        crate::handlers::projects::list_projects,
        crate::handlers::projects::create_project,
        crate::handlers::tasks::list_tasks,
        crate::handlers::tasks::create_task,
        crate::handlers::tasks::update_task_status,
        crate::handlers::tasks::list_user_tasks,
        crate::handlers::search::search,
    ),
    components(schemas(
        User,
        CreateUserRequest,
        Team,
        TeamWithUsernames,
        CreateTeamRequest,
        Project,
        CreateProjectRequest,
        Task,
        TaskWithUsers,
        CreateTaskRequest,
        UpdateTaskStatusRequest,
        SearchRequest,
        SearchResults,
        ErrorBody,
        ErrorDebug,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "teams", description = "Teams"),
        (name = "projects", description = "Projects"),
        (name = "tasks", description = "Tasks"),
        (name = "search", description = "Cross-entity search"),
    )
)]
pub struct ApiDoc;
