use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::app::AppState;
use crate::dashboard::{Dashboard, DashboardView, ViewMode};
use crate::handlers::configuration_missing;
use crate::middleware::auth_middleware::AuthenticatedUser;
use crate::models::category::{CreateCategoryRequest, DEFAULT_CATEGORY_COLOR};
use crate::models::task::{CreateTaskRequest, UpdateTaskRequest};

/// Layout selection for dashboard responses
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// `grouped` (default) or `flat`
    pub view: Option<ViewMode>,
}

/// Build and load the dashboard for the authenticated user
async fn open_dashboard(
    state: &AppState,
    auth_user: AuthenticatedUser,
    query: &DashboardQuery,
) -> Result<Dashboard, Response> {
    let services = state.services.as_ref().ok_or_else(configuration_missing)?;

    let mut dashboard = Dashboard::new(
        auth_user.session,
        services.categories.clone(),
        services.tasks.clone(),
    );
    if let Some(view) = query.view {
        dashboard.set_view_mode(view);
    }
    dashboard.load().await;
    Ok(dashboard)
}

/// Status for a write: 201 when something new exists, 200 otherwise
fn created_or_ok(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

/// Handler for the dashboard
///
/// Loads the user's categories and tasks and returns the derived view.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard for the signed-in user", body = DashboardView),
        (status = 303, description = "No live session; redirect to login")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "dashboard"
)]
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, Response> {
    let dashboard = open_dashboard(&state, auth_user, &query).await?;
    Ok(Json(dashboard.view()))
}

/// Handler for creating a task
///
/// Blank titles are ignored and the unchanged dashboard is returned.
#[utoipa::path(
    post,
    path = "/api/tasks",
    params(DashboardQuery),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = DashboardView),
        (status = 200, description = "Nothing created (blank title or backend failure)", body = DashboardView),
        (status = 303, description = "No live session; redirect to login")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "tasks"
)]
pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<DashboardView>), Response> {
    let mut dashboard = open_dashboard(&state, auth_user, &query).await?;
    let created = dashboard.add_task(&request.title, request.category_id).await;
    Ok((created_or_ok(created), Json(dashboard.view())))
}

/// Handler for checking or unchecking a task
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    params(
        ("id" = Uuid, Path, description = "Task ID"),
        DashboardQuery
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Dashboard after the update", body = DashboardView),
        (status = 303, description = "No live session; redirect to login")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "tasks"
)]
pub async fn update_task_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(task_id): Path<Uuid>,
    Query(query): Query<DashboardQuery>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<DashboardView>, Response> {
    let mut dashboard = open_dashboard(&state, auth_user, &query).await?;
    dashboard.toggle_task(task_id, request.completed).await;
    Ok(Json(dashboard.view()))
}

/// Handler for deleting a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = Uuid, Path, description = "Task ID"),
        DashboardQuery
    ),
    responses(
        (status = 200, description = "Dashboard after the delete", body = DashboardView),
        (status = 303, description = "No live session; redirect to login")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "tasks"
)]
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(task_id): Path<Uuid>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, Response> {
    let mut dashboard = open_dashboard(&state, auth_user, &query).await?;
    dashboard.delete_task(task_id).await;
    Ok(Json(dashboard.view()))
}

/// Handler for creating a category
#[utoipa::path(
    post,
    path = "/api/categories",
    params(DashboardQuery),
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = DashboardView),
        (status = 200, description = "Nothing created (blank name or backend failure)", body = DashboardView),
        (status = 303, description = "No live session; redirect to login")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn create_category_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<DashboardView>), Response> {
    let mut dashboard = open_dashboard(&state, auth_user, &query).await?;
    let color = request.color.as_deref().unwrap_or(DEFAULT_CATEGORY_COLOR);
    let created = dashboard.add_category(&request.name, color).await;
    Ok((created_or_ok(created), Json(dashboard.view())))
}

/// Handler for deleting a category
///
/// Tasks filed under the category become uncategorized.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        DashboardQuery
    ),
    responses(
        (status = 200, description = "Dashboard after the delete", body = DashboardView),
        (status = 303, description = "No live session; redirect to login")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "categories"
)]
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(category_id): Path<Uuid>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, Response> {
    let mut dashboard = open_dashboard(&state, auth_user, &query).await?;
    dashboard.delete_category(category_id).await;
    Ok(Json(dashboard.view()))
}
