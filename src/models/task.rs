use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Task entity, optionally filed under one of the owner's categories
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    /// None means uncategorized
    pub category_id: Option<Uuid>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row inserted into the `tasks` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub category_id: Option<Uuid>,
    pub user_id: Uuid,
    pub completed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>, category_id: Option<Uuid>, user_id: Uuid) -> Self {
        Self {
            title: title.into(),
            category_id,
            user_id,
            completed: false,
        }
    }
}

/// Partial update applied when a task is checked or unchecked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionPatch {
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "title": "Photocopy passport",
    "category_id": "550e8400-e29b-41d4-a716-446655440000"
}))]
pub struct CreateTaskRequest {
    pub title: String,
    pub category_id: Option<Uuid>,
}

/// Request payload for checking or unchecking a task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "completed": true }))]
pub struct UpdateTaskRequest {
    pub completed: bool,
}
