use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::task::{CompletionPatch, NewTask, Task};
use crate::models::user::Session;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::RepositoryError;
use crate::validation::is_blank;

/// Task service errors
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Task title cannot be blank")]
    BlankTitle,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Unauthorized to access this task: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for TaskError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => TaskError::TaskNotFound,
            RepositoryError::Unauthorized(msg) => TaskError::Unauthorized(msg),
            RepositoryError::DatabaseError(msg) => TaskError::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => TaskError::DatabaseError(msg),
        }
    }
}

/// Trait defining task service operations
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Tasks of the session user, newest first
    async fn list(&self, session: &Session) -> Result<Vec<Task>, TaskError>;

    /// Create an open task; blank titles are rejected before any backend call
    async fn create(
        &self,
        session: &Session,
        title: &str,
        category_id: Option<Uuid>,
    ) -> Result<Task, TaskError>;

    /// Check or uncheck a task, refreshing its update timestamp
    async fn set_completion(
        &self,
        session: &Session,
        id: Uuid,
        completed: bool,
    ) -> Result<Task, TaskError>;

    /// Delete a task
    async fn remove(&self, session: &Session, id: Uuid) -> Result<(), TaskError>;

    /// Move every task of a category to uncategorized
    async fn detach_category(&self, session: &Session, category_id: Uuid)
        -> Result<usize, TaskError>;
}

/// Implementation of TaskService
pub struct TaskServiceImpl {
    task_repository: Arc<dyn TaskRepository>,
}

impl TaskServiceImpl {
    pub fn new(task_repository: Arc<dyn TaskRepository>) -> Self {
        Self { task_repository }
    }
}

#[async_trait]
impl TaskService for TaskServiceImpl {
    async fn list(&self, session: &Session) -> Result<Vec<Task>, TaskError> {
        Ok(self.task_repository.find_by_owner(session).await?)
    }

    async fn create(
        &self,
        session: &Session,
        title: &str,
        category_id: Option<Uuid>,
    ) -> Result<Task, TaskError> {
        if is_blank(title) {
            return Err(TaskError::BlankTitle);
        }

        let task = NewTask::new(title, category_id, session.user_id());
        Ok(self.task_repository.create(session, task).await?)
    }

    async fn set_completion(
        &self,
        session: &Session,
        id: Uuid,
        completed: bool,
    ) -> Result<Task, TaskError> {
        let patch = CompletionPatch {
            completed,
            updated_at: Utc::now(),
        };
        Ok(self
            .task_repository
            .update_completion(session, id, patch)
            .await?)
    }

    async fn remove(&self, session: &Session, id: Uuid) -> Result<(), TaskError> {
        Ok(self.task_repository.delete(session, id).await?)
    }

    async fn detach_category(
        &self,
        session: &Session,
        category_id: Uuid,
    ) -> Result<usize, TaskError> {
        let detached = self
            .task_repository
            .clear_category(session, category_id)
            .await?;

        tracing::debug!(%category_id, detached, "Detached tasks from category");
        Ok(detached)
    }
}
