use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Categories inserted for a user who has none yet, as `(name, color)` pairs
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("ÉTAT CIVIL", "#3B82F6"),
    ("DOCUMENTS PERSONNELS", "#10B981"),
    ("PHOTOS", "#F59E0B"),
];

/// Color given to a new category when the caller does not pick one
pub const DEFAULT_CATEGORY_COLOR: &str = "#3B82F6";

/// Label shown for tasks without a (known) category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Neutral color shown for tasks without a (known) category
pub const UNCATEGORIZED_COLOR: &str = "#6B7280";

/// Category entity grouping a user's tasks
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Row inserted into the `categories` table; id and timestamp are server-assigned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub user_id: Uuid,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            user_id,
        }
    }

    /// The seed rows for `user_id`, in display order
    pub fn defaults_for(user_id: Uuid) -> Vec<Self> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color)| Self::new(*name, *color, user_id))
            .collect()
    }
}

/// Request payload for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Travel",
    "color": "#10B981"
}))]
pub struct CreateCategoryRequest {
    pub name: String,
    /// Defaults to `#3B82F6`
    pub color: Option<String>,
}
