use async_trait::async_trait;
use reqwest::Method;

use crate::client::{ServiceClient, send_empty, send_json};
use crate::models::user::Identity;

/// Authentication service errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid or expired session")]
    InvalidSession,

    #[error("Auth service error: {0}")]
    ServiceError(String),
}

/// Trait defining the slice of the hosted auth API this service consumes
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the user behind an access token.
    ///
    /// `Ok(None)` means the token was understood but names no live session.
    async fn current_identity(&self, access_token: &str) -> Result<Option<Identity>, AuthError>;

    /// End the session the access token belongs to
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

/// GoTrue-backed implementation of AuthService
pub struct SupabaseAuthService {
    client: ServiceClient,
}

impl SupabaseAuthService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for SupabaseAuthService {
    async fn current_identity(&self, access_token: &str) -> Result<Option<Identity>, AuthError> {
        let request = self.client.auth(Method::GET, "user", access_token);

        match send_json::<Identity>(request).await {
            Ok(identity) => Ok(Some(identity)),
            Err(e) if e.is_auth_error() => {
                tracing::debug!(error = %e, "Access token rejected by auth service");
                Ok(None)
            }
            Err(e) => Err(AuthError::ServiceError(e.to_string())),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let request = self.client.auth(Method::POST, "logout", access_token);

        send_empty(request).await.map_err(|e| {
            if e.is_auth_error() {
                AuthError::InvalidSession
            } else {
                AuthError::ServiceError(e.to_string())
            }
        })
    }
}
