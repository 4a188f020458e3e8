//! In-memory doubles shared by the unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;
use uuid::Uuid;

use crate::models::category::{Category, NewCategory};
use crate::models::task::{CompletionPatch, NewTask, Task};
use crate::models::user::{Identity, Session};
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::RepositoryError;
use crate::services::auth_service::{AuthError, AuthService};

static CLOCK: AtomicI64 = AtomicI64::new(0);

/// Strictly increasing timestamps so ordering assertions are stable
fn tick() -> DateTime<Utc> {
    let step = CLOCK.fetch_add(1, Ordering::SeqCst);
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(1_700_000_000 + step)
}

pub fn test_session() -> Session {
    let id = Uuid::new_v4();
    let identity = Identity {
        id,
        email: Some("user@example.com".to_string()),
    };
    Session::new(identity, format!("token-{}", id))
}

fn failure() -> RepositoryError {
    RepositoryError::DatabaseError("Database error".to_string())
}

pub struct InMemoryCategoryRepository {
    list_gate: Option<Arc<Barrier>>,
    categories: Mutex<Vec<Category>>,
    calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            list_gate: None,
            categories: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn with_failure() -> Self {
        let repo = Self::new();
        repo.set_failing(true);
        repo
    }

    /// Make `find_by_owner` wait on `gate` before answering
    pub fn with_list_gate(mut self, gate: Arc<Barrier>) -> Self {
        self.list_gate = Some(gate);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Category> {
        self.categories.lock().unwrap().clone()
    }

    fn enter(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_by_owner(&self, session: &Session) -> Result<Vec<Category>, RepositoryError> {
        if let Some(gate) = &self.list_gate {
            gate.wait().await;
        }
        self.enter()?;
        let mut result: Vec<Category> = self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == session.user_id())
            .cloned()
            .collect();
        result.sort_by_key(|c| c.created_at);
        Ok(result)
    }

    async fn insert_many(
        &self,
        _session: &Session,
        categories: Vec<NewCategory>,
    ) -> Result<Vec<Category>, RepositoryError> {
        self.enter()?;
        let rows: Vec<Category> = categories
            .into_iter()
            .map(|c| Category {
                id: Uuid::new_v4(),
                name: c.name,
                color: c.color,
                user_id: c.user_id,
                created_at: tick(),
            })
            .collect();
        self.categories.lock().unwrap().extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn create(
        &self,
        session: &Session,
        category: NewCategory,
    ) -> Result<Category, RepositoryError> {
        let mut rows = self.insert_many(session, vec![category]).await?;
        Ok(rows.remove(0))
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), RepositoryError> {
        self.enter()?;
        self.categories
            .lock()
            .unwrap()
            .retain(|c| !(c.id == id && c.user_id == session.user_id()));
        Ok(())
    }
}

pub struct InMemoryTaskRepository {
    list_gate: Option<Arc<Barrier>>,
    tasks: Mutex<Vec<Task>>,
    calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            list_gate: None,
            tasks: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make `find_by_owner` wait on `gate` before answering
    pub fn with_list_gate(mut self, gate: Arc<Barrier>) -> Self {
        self.list_gate = Some(gate);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    fn enter(&self) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_owner(&self, session: &Session) -> Result<Vec<Task>, RepositoryError> {
        if let Some(gate) = &self.list_gate {
            gate.wait().await;
        }
        self.enter()?;
        let mut result: Vec<Task> = self
            .tasks
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == session.user_id())
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn create(&self, _session: &Session, task: NewTask) -> Result<Task, RepositoryError> {
        self.enter()?;
        let row = Task {
            id: Uuid::new_v4(),
            title: task.title,
            completed: task.completed,
            category_id: task.category_id,
            user_id: task.user_id,
            created_at: tick(),
            updated_at: None,
        };
        self.tasks.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_completion(
        &self,
        session: &Session,
        id: Uuid,
        patch: CompletionPatch,
    ) -> Result<Task, RepositoryError> {
        self.enter()?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == session.user_id())
            .ok_or(RepositoryError::NotFound)?;
        task.completed = patch.completed;
        task.updated_at = Some(patch.updated_at);
        Ok(task.clone())
    }

    async fn delete(&self, session: &Session, id: Uuid) -> Result<(), RepositoryError> {
        self.enter()?;
        self.tasks
            .lock()
            .unwrap()
            .retain(|t| !(t.id == id && t.user_id == session.user_id()));
        Ok(())
    }

    async fn clear_category(
        &self,
        session: &Session,
        category_id: Uuid,
    ) -> Result<usize, RepositoryError> {
        self.enter()?;
        let mut detached = 0;
        for task in self.tasks.lock().unwrap().iter_mut() {
            if task.user_id == session.user_id() && task.category_id == Some(category_id) {
                task.category_id = None;
                detached += 1;
            }
        }
        Ok(detached)
    }
}

/// Auth double keyed by access token
pub struct MockAuthService {
    sessions: Mutex<HashMap<String, Identity>>,
    signed_out: Mutex<Vec<String>>,
    should_fail: bool,
}

impl MockAuthService {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            signed_out: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn with_session(self, session: &Session) -> Self {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.access_token.clone(), session.identity.clone());
        self
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.signed_out.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn current_identity(&self, access_token: &str) -> Result<Option<Identity>, AuthError> {
        if self.should_fail {
            return Err(AuthError::ServiceError("auth down".to_string()));
        }
        Ok(self.sessions.lock().unwrap().get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        if self.should_fail {
            return Err(AuthError::ServiceError("auth down".to_string()));
        }
        self.sessions.lock().unwrap().remove(access_token);
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }
}
