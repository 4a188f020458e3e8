pub mod auth_handlers;
pub mod dashboard_handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

/// Static error returned when the backend connection is not configured
pub fn configuration_missing() -> Response {
    let body = ErrorResponse::new(
        "configuration_missing",
        "Supabase environment variables are not configured",
    );
    (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
}
