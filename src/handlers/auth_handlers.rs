use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::AppState;
use crate::handlers::configuration_missing;
use crate::middleware::auth_middleware::bearer_token;
use crate::session::{GuardOutcome, Route};

/// Handler for the landing page
///
/// Sends signed-in callers to the dashboard and everyone else to login.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 303, description = "Redirect to the dashboard or to login"),
        (status = 503, description = "Backend configuration missing", body = crate::handlers::ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn home_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.services.is_none() {
        return configuration_missing();
    }

    let target = match state.guard.check(bearer_token(&headers)).await {
        GuardOutcome::Admit(_) => Route::Dashboard,
        GuardOutcome::Redirect(route) => route,
    };
    Redirect::to(target.path()).into_response()
}

/// Handler for signing out
///
/// Ends the backend session when there is one, then redirects to login.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 303, description = "Signed out; redirect to login")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "auth"
)]
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let (Some(services), Some(token)) = (state.services.as_ref(), bearer_token(&headers)) {
        if let Err(e) = services.auth.sign_out(token).await {
            tracing::warn!(error = %e, "Sign-out failed");
        }
    }
    Redirect::to(Route::Login.path()).into_response()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
