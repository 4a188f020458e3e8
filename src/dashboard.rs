use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::category::{Category, UNCATEGORIZED_COLOR, UNCATEGORIZED_LABEL};
use crate::models::task::Task;
use crate::models::user::{Identity, Session};
use crate::services::category_service::{CategoryError, CategoryService};
use crate::services::task_service::{TaskError, TaskService};

/// How the task list is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grouped,
    Flat,
}

/// Bucket key used when grouping tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Category(Uuid),
    Uncategorized,
}

impl From<Option<Uuid>> for CategoryKey {
    fn from(category_id: Option<Uuid>) -> Self {
        category_id.map_or(CategoryKey::Uncategorized, CategoryKey::Category)
    }
}

impl CategoryKey {
    pub fn category_id(self) -> Option<Uuid> {
        match self {
            CategoryKey::Category(id) => Some(id),
            CategoryKey::Uncategorized => None,
        }
    }
}

/// Share of completed tasks as a percentage, 0 for an empty list
pub fn progress_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Partition tasks by category.
///
/// Buckets come out in order of first appearance in `tasks`, and each bucket
/// keeps the relative order of its tasks.
pub fn group_by_category(tasks: &[Task]) -> Vec<(CategoryKey, Vec<&Task>)> {
    let mut groups: Vec<(CategoryKey, Vec<&Task>)> = Vec::new();
    let mut index: HashMap<CategoryKey, usize> = HashMap::new();

    for task in tasks {
        let key = CategoryKey::from(task.category_id);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(task);
    }

    groups
}

/// A task with its category's display attributes resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskView {
    pub task: Task,
    pub category_name: String,
    pub category_color: String,
}

/// One category bucket of the grouped layout
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskGroupView {
    /// None for the uncategorized bucket
    pub category_id: Option<Uuid>,
    pub name: String,
    pub color: String,
    pub completed_count: usize,
    pub total_count: usize,
    pub tasks: Vec<Task>,
}

/// Snapshot of everything the dashboard shows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardView {
    pub user: Identity,
    pub categories: Vec<Category>,
    pub completed_count: usize,
    pub total_count: usize,
    pub progress_percentage: f64,
    pub view_mode: ViewMode,
    /// Every task, newest first
    pub tasks: Vec<TaskView>,
    /// Category buckets; empty in flat mode
    pub groups: Vec<TaskGroupView>,
}

/// State of one loaded dashboard for one signed-in user.
///
/// Local state only changes after the matching backend call succeeded, so a
/// failed write never leaves the view ahead of the store.
pub struct Dashboard {
    session: Session,
    category_service: Arc<dyn CategoryService>,
    task_service: Arc<dyn TaskService>,
    categories: Vec<Category>,
    tasks: Vec<Task>,
    view_mode: ViewMode,
    loaded: bool,
}

impl Dashboard {
    pub fn new(
        session: Session,
        category_service: Arc<dyn CategoryService>,
        task_service: Arc<dyn TaskService>,
    ) -> Self {
        Self {
            session,
            category_service,
            task_service,
            categories: Vec::new(),
            tasks: Vec::new(),
            view_mode: ViewMode::default(),
            loaded: false,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Grouped => ViewMode::Flat,
            ViewMode::Flat => ViewMode::Grouped,
        };
    }

    /// Fetch categories and tasks concurrently.
    ///
    /// A list that fails to load is logged and left as it was.
    pub async fn load(&mut self) {
        let (categories, tasks) = tokio::join!(
            self.category_service.list(&self.session),
            self.task_service.list(&self.session)
        );

        match categories {
            Ok(categories) => self.categories = categories,
            Err(e) => tracing::error!(error = %e, "Failed to load categories"),
        }
        match tasks {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => tracing::error!(error = %e, "Failed to load tasks"),
        }

        self.loaded = true;
    }

    /// Returns whether a task was created
    pub async fn add_task(&mut self, title: &str, category_id: Option<Uuid>) -> bool {
        match self
            .task_service
            .create(&self.session, title, category_id)
            .await
        {
            Ok(task) => {
                self.tasks.insert(0, task);
                true
            }
            Err(TaskError::BlankTitle) => {
                tracing::debug!("Ignoring task with blank title");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add task");
                false
            }
        }
    }

    pub async fn toggle_task(&mut self, task_id: Uuid, completed: bool) -> bool {
        match self
            .task_service
            .set_completion(&self.session, task_id, completed)
            .await
        {
            Ok(updated) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                    *task = updated;
                }
                true
            }
            Err(e) => {
                tracing::error!(error = %e, %task_id, "Failed to update task");
                false
            }
        }
    }

    pub async fn delete_task(&mut self, task_id: Uuid) -> bool {
        match self.task_service.remove(&self.session, task_id).await {
            Ok(()) => {
                self.tasks.retain(|t| t.id != task_id);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, %task_id, "Failed to delete task");
                false
            }
        }
    }

    /// Returns whether a category was created
    pub async fn add_category(&mut self, name: &str, color: &str) -> bool {
        match self
            .category_service
            .create(&self.session, name, color)
            .await
        {
            Ok(category) => {
                self.categories.push(category);
                true
            }
            Err(CategoryError::BlankName) => {
                tracing::debug!("Ignoring category with blank name");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add category");
                false
            }
        }
    }

    /// Delete a category after moving its tasks to uncategorized.
    ///
    /// The detachment is persisted first; local tasks follow as soon as it
    /// is, even if the category delete itself then fails.
    pub async fn delete_category(&mut self, category_id: Uuid) -> bool {
        if let Err(e) = self
            .task_service
            .detach_category(&self.session, category_id)
            .await
        {
            tracing::error!(error = %e, %category_id, "Failed to detach tasks from category");
            return false;
        }
        self.detach_local(category_id);

        match self
            .category_service
            .remove(&self.session, category_id)
            .await
        {
            Ok(()) => {
                self.categories.retain(|c| c.id != category_id);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, %category_id, "Failed to delete category");
                false
            }
        }
    }

    fn detach_local(&mut self, category_id: Uuid) {
        for task in self
            .tasks
            .iter_mut()
            .filter(|t| t.category_id == Some(category_id))
        {
            task.category_id = None;
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn progress_percentage(&self) -> f64 {
        progress_percentage(self.completed_count(), self.total_count())
    }

    pub fn grouped_by_category(&self) -> Vec<(CategoryKey, Vec<&Task>)> {
        group_by_category(&self.tasks)
    }

    fn find_category(&self, category_id: Option<Uuid>) -> Option<&Category> {
        let id = category_id?;
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display name for a category id; unknown and absent ids read as uncategorized
    pub fn category_name(&self, category_id: Option<Uuid>) -> &str {
        self.find_category(category_id)
            .map_or(UNCATEGORIZED_LABEL, |c| c.name.as_str())
    }

    pub fn category_color(&self, category_id: Option<Uuid>) -> &str {
        self.find_category(category_id)
            .map_or(UNCATEGORIZED_COLOR, |c| c.color.as_str())
    }

    pub fn view(&self) -> DashboardView {
        let tasks = self
            .tasks
            .iter()
            .map(|task| TaskView {
                task: task.clone(),
                category_name: self.category_name(task.category_id).to_string(),
                category_color: self.category_color(task.category_id).to_string(),
            })
            .collect();

        let groups = match self.view_mode {
            ViewMode::Flat => Vec::new(),
            ViewMode::Grouped => self
                .grouped_by_category()
                .into_iter()
                .map(|(key, tasks)| TaskGroupView {
                    category_id: key.category_id(),
                    name: self.category_name(key.category_id()).to_string(),
                    color: self.category_color(key.category_id()).to_string(),
                    completed_count: tasks.iter().filter(|t| t.completed).count(),
                    total_count: tasks.len(),
                    tasks: tasks.into_iter().cloned().collect(),
                })
                .collect(),
        };

        DashboardView {
            user: self.session.identity.clone(),
            categories: self.categories.clone(),
            completed_count: self.completed_count(),
            total_count: self.total_count(),
            progress_percentage: self.progress_percentage(),
            view_mode: self.view_mode,
            tasks,
            groups,
        }
    }
}
