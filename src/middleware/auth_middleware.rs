use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::AppState;
use crate::models::user::Session;
use crate::session::GuardOutcome;

/// Extension type carrying the verified session into handlers
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub session: Session,
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Session guard middleware.
///
/// Callers without a live session are redirected to the login route before
/// any data operation runs; admitted callers get an [`AuthenticatedUser`]
/// extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    match state.guard.check(bearer_token(&headers)).await {
        GuardOutcome::Admit(session) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser { session });
            next.run(request).await
        }
        GuardOutcome::Redirect(route) => Redirect::to(route.path()).into_response(),
    }
}
