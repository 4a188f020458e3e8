use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use crate::client::{ServiceClient, send_empty, send_json};
use crate::models::task::{CompletionPatch, NewTask, Task};
use crate::models::user::Session;
use crate::repositories::{RETURN_REPRESENTATION, RepositoryError, eq};

const TABLE: &str = "tasks";

/// Trait defining task repository operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks owned by the session user, newest first
    async fn find_by_owner(&self, session: &Session) -> Result<Vec<Task>, RepositoryError>;

    /// Insert a new task
    async fn create(&self, session: &Session, task: NewTask) -> Result<Task, RepositoryError>;

    /// Set the completion flag (and update timestamp) of one task
    async fn update_completion(
        &self,
        session: &Session,
        id: Uuid,
        patch: CompletionPatch,
    ) -> Result<Task, RepositoryError>;

    /// Delete a task by ID
    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), RepositoryError>;

    /// Clear the category of every owned task filed under `category_id`,
    /// returning how many rows changed
    async fn clear_category(
        &self,
        session: &Session,
        category_id: Uuid,
    ) -> Result<usize, RepositoryError>;
}

/// PostgREST implementation of TaskRepository
pub struct RestTaskRepository {
    client: ServiceClient,
}

impl RestTaskRepository {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskRepository for RestTaskRepository {
    async fn find_by_owner(&self, session: &Session) -> Result<Vec<Task>, RepositoryError> {
        let request = self
            .client
            .table(Method::GET, TABLE, session)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq(session.user_id())),
                ("order", "created_at.desc".to_string()),
            ]);

        Ok(send_json(request).await?)
    }

    async fn create(&self, session: &Session, task: NewTask) -> Result<Task, RepositoryError> {
        let (header, value) = RETURN_REPRESENTATION;
        let request = self
            .client
            .table(Method::POST, TABLE, session)
            .header(header, value)
            .json(&task);

        let rows: Vec<Task> = send_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepositoryError::DatabaseError("Insert returned no rows".to_string()))
    }

    async fn update_completion(
        &self,
        session: &Session,
        id: Uuid,
        patch: CompletionPatch,
    ) -> Result<Task, RepositoryError> {
        let (header, value) = RETURN_REPRESENTATION;
        let request = self
            .client
            .table(Method::PATCH, TABLE, session)
            .query(&[("id", eq(id)), ("user_id", eq(session.user_id()))])
            .header(header, value)
            .json(&patch);

        // An update that matches nothing comes back as an empty array
        let rows: Vec<Task> = send_json(request).await?;
        rows.into_iter().next().ok_or(RepositoryError::NotFound)
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), RepositoryError> {
        let request = self
            .client
            .table(Method::DELETE, TABLE, session)
            .query(&[("id", eq(id)), ("user_id", eq(session.user_id()))]);

        Ok(send_empty(request).await?)
    }

    async fn clear_category(
        &self,
        session: &Session,
        category_id: Uuid,
    ) -> Result<usize, RepositoryError> {
        let (header, value) = RETURN_REPRESENTATION;
        let request = self
            .client
            .table(Method::PATCH, TABLE, session)
            .query(&[
                ("category_id", eq(category_id)),
                ("user_id", eq(session.user_id())),
            ])
            .header(header, value)
            .json(&json!({ "category_id": null }));

        let rows: Vec<Task> = send_json(request).await?;
        Ok(rows.len())
    }
}
