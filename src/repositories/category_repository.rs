use async_trait::async_trait;
use reqwest::Method;
use uuid::Uuid;

use crate::client::{ServiceClient, send_empty, send_json};
use crate::models::category::{Category, NewCategory};
use crate::models::user::Session;
use crate::repositories::{RETURN_REPRESENTATION, RepositoryError, eq};

const TABLE: &str = "categories";

/// Trait defining category repository operations
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories owned by the session user, oldest first
    async fn find_by_owner(&self, session: &Session) -> Result<Vec<Category>, RepositoryError>;

    /// Insert several rows in one call, returning them as stored
    async fn insert_many(
        &self,
        session: &Session,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, RepositoryError>;

    /// Insert a single row
    async fn create(
        &self,
        session: &Session,
        category: NewCategory,
    ) -> Result<Category, RepositoryError>;

    /// Delete a category by ID
    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), RepositoryError>;
}

/// PostgREST implementation of CategoryRepository
pub struct RestCategoryRepository {
    client: ServiceClient,
}

impl RestCategoryRepository {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryRepository for RestCategoryRepository {
    async fn find_by_owner(&self, session: &Session) -> Result<Vec<Category>, RepositoryError> {
        let request = self
            .client
            .table(Method::GET, TABLE, session)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq(session.user_id())),
                ("order", "created_at.asc".to_string()),
            ]);

        Ok(send_json(request).await?)
    }

    async fn insert_many(
        &self,
        session: &Session,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, RepositoryError> {
        let (header, value) = RETURN_REPRESENTATION;
        let request = self
            .client
            .table(Method::POST, TABLE, session)
            .header(header, value)
            .json(&categories);

        Ok(send_json(request).await?)
    }

    async fn create(
        &self,
        session: &Session,
        category: NewCategory,
    ) -> Result<Category, RepositoryError> {
        self.insert_many(session, vec![category])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::DatabaseError("Insert returned no rows".to_string()))
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), RepositoryError> {
        let request = self
            .client
            .table(Method::DELETE, TABLE, session)
            .query(&[("id", eq(id)), ("user_id", eq(session.user_id()))]);

        Ok(send_empty(request).await?)
    }
}
