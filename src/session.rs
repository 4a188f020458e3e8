use std::sync::Arc;

use crate::models::user::Session;
use crate::services::auth_service::AuthService;

/// Navigation targets the service redirects to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/auth/login",
            Route::Dashboard => "/api/dashboard",
        }
    }
}

/// Result of checking a caller's session
#[derive(Debug, Clone)]
pub enum GuardOutcome {
    Admit(Session),
    Redirect(Route),
}

/// Admits callers with a live session and sends everyone else to login.
///
/// Holds no auth service when the backend is not configured, in which case
/// nobody is admitted.
#[derive(Clone)]
pub struct SessionGuard {
    auth_service: Option<Arc<dyn AuthService>>,
}

impl SessionGuard {
    pub fn new(auth_service: Option<Arc<dyn AuthService>>) -> Self {
        Self { auth_service }
    }

    pub async fn check(&self, access_token: Option<&str>) -> GuardOutcome {
        let Some(auth_service) = &self.auth_service else {
            return GuardOutcome::Redirect(Route::Login);
        };
        let Some(access_token) = access_token else {
            return GuardOutcome::Redirect(Route::Login);
        };

        match auth_service.current_identity(access_token).await {
            Ok(Some(identity)) => GuardOutcome::Admit(Session::new(identity, access_token)),
            Ok(None) => GuardOutcome::Redirect(Route::Login),
            Err(e) => {
                tracing::error!(error = %e, "Failed to verify user session");
                GuardOutcome::Redirect(Route::Login)
            }
        }
    }
}
