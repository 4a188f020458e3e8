use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::client::ServiceClient;
use crate::dashboard::{DashboardView, TaskGroupView, TaskView, ViewMode};
use crate::handlers::auth_handlers::{health_check, home_handler, logout_handler};
use crate::handlers::dashboard_handlers::{
    create_category_handler, create_task_handler, dashboard_handler, delete_category_handler,
    delete_task_handler, update_task_handler,
};
use crate::handlers::ErrorResponse;
use crate::middleware::auth_middleware::auth_middleware;
use crate::models::category::{Category, CreateCategoryRequest};
use crate::models::task::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::models::user::Identity;
use crate::repositories::category_repository::RestCategoryRepository;
use crate::repositories::task_repository::RestTaskRepository;
use crate::services::auth_service::{AuthService, SupabaseAuthService};
use crate::services::category_service::{CategoryService, CategoryServiceImpl};
use crate::services::task_service::{TaskService, TaskServiceImpl};
use crate::session::SessionGuard;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handlers::home_handler,
        crate::handlers::auth_handlers::logout_handler,
        crate::handlers::dashboard_handlers::dashboard_handler,
        crate::handlers::dashboard_handlers::create_task_handler,
        crate::handlers::dashboard_handlers::update_task_handler,
        crate::handlers::dashboard_handlers::delete_task_handler,
        crate::handlers::dashboard_handlers::create_category_handler,
        crate::handlers::dashboard_handlers::delete_category_handler,
    ),
    components(
        schemas(
            Category, CreateCategoryRequest, Task, CreateTaskRequest, UpdateTaskRequest,
            Identity, DashboardView, TaskView, TaskGroupView, ViewMode, ErrorResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Session endpoints"),
        (name = "dashboard", description = "Dashboard view"),
        (name = "tasks", description = "Task endpoints"),
        (name = "categories", description = "Category endpoints")
    ),
    info(
        title = "Task Dashboard API",
        version = "0.1.0",
        description = "Per-user task lists grouped by category",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Backend-facing services shared by every request
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub categories: Arc<dyn CategoryService>,
    pub tasks: Arc<dyn TaskService>,
}

impl Services {
    /// Wire the REST repositories and services around one client
    pub fn from_client(client: ServiceClient) -> Self {
        let category_repository = Arc::new(RestCategoryRepository::new(client.clone()));
        let task_repository = Arc::new(RestTaskRepository::new(client.clone()));

        Self {
            auth: Arc::new(SupabaseAuthService::new(client)),
            categories: Arc::new(CategoryServiceImpl::new(category_repository)),
            tasks: Arc::new(TaskServiceImpl::new(task_repository)),
        }
    }
}

/// Router state; `services` is None when the backend is not configured
#[derive(Clone)]
pub struct AppState {
    pub services: Option<Services>,
    pub guard: SessionGuard,
}

impl AppState {
    pub fn new(services: Option<Services>) -> Self {
        let guard = SessionGuard::new(services.as_ref().map(|s| s.auth.clone()));
        Self { services, guard }
    }

    pub fn from_client(client: Option<ServiceClient>) -> Self {
        Self::new(client.map(Services::from_client))
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/tasks", post(create_task_handler))
        .route(
            "/api/tasks/{id}",
            patch(update_task_handler).delete(delete_task_handler),
        )
        .route("/api/categories", post(create_category_handler))
        .route("/api/categories/{id}", delete(delete_category_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/", get(home_handler))
        .route("/api/auth/logout", post(logout_handler))
        .merge(protected)
        .with_state(state)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}
