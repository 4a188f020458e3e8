use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::category::{Category, NewCategory};
use crate::models::user::Session;
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::RepositoryError;
use crate::validation::is_blank;

/// Category service errors
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("Category name cannot be blank")]
    BlankName,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Unauthorized to access this category: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RepositoryError> for CategoryError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => CategoryError::CategoryNotFound,
            RepositoryError::Unauthorized(msg) => CategoryError::Unauthorized(msg),
            RepositoryError::DatabaseError(msg) => CategoryError::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => CategoryError::DatabaseError(msg),
        }
    }
}

/// Trait defining category service operations
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// Categories of the session user, oldest first; seeds the defaults when
    /// the user has none.
    ///
    /// The empty check and the insert are separate requests, so two first
    /// visits racing each other can both seed. Nothing in the store rejects
    /// the duplicate rows.
    async fn list(&self, session: &Session) -> Result<Vec<Category>, CategoryError>;

    /// Insert the default categories for the session user
    async fn seed_defaults(&self, session: &Session) -> Result<Vec<Category>, CategoryError>;

    /// Create a category; blank names are rejected before any backend call
    async fn create(
        &self,
        session: &Session,
        name: &str,
        color: &str,
    ) -> Result<Category, CategoryError>;

    /// Delete a category. Detaching its tasks is up to the caller.
    async fn remove(&self, session: &Session, id: Uuid) -> Result<(), CategoryError>;
}

/// Implementation of CategoryService
pub struct CategoryServiceImpl {
    category_repository: Arc<dyn CategoryRepository>,
}

impl CategoryServiceImpl {
    pub fn new(category_repository: Arc<dyn CategoryRepository>) -> Self {
        Self {
            category_repository,
        }
    }
}

#[async_trait]
impl CategoryService for CategoryServiceImpl {
    async fn list(&self, session: &Session) -> Result<Vec<Category>, CategoryError> {
        let categories = self.category_repository.find_by_owner(session).await?;

        if categories.is_empty() {
            return self.seed_defaults(session).await;
        }
        Ok(categories)
    }

    async fn seed_defaults(&self, session: &Session) -> Result<Vec<Category>, CategoryError> {
        let defaults = NewCategory::defaults_for(session.user_id());
        let seeded = self
            .category_repository
            .insert_many(session, defaults)
            .await?;

        tracing::info!(
            user_id = %session.user_id(),
            count = seeded.len(),
            "Seeded default categories"
        );
        Ok(seeded)
    }

    async fn create(
        &self,
        session: &Session,
        name: &str,
        color: &str,
    ) -> Result<Category, CategoryError> {
        if is_blank(name) {
            return Err(CategoryError::BlankName);
        }

        let category = NewCategory::new(name, color, session.user_id());
        Ok(self.category_repository.create(session, category).await?)
    }

    async fn remove(&self, session: &Session, id: Uuid) -> Result<(), CategoryError> {
        Ok(self.category_repository.delete(session, id).await?)
    }
}
