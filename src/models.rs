pub mod category;
pub mod task;
pub mod user;

pub use category::{
    Category, CreateCategoryRequest, NewCategory, DEFAULT_CATEGORIES, DEFAULT_CATEGORY_COLOR,
    UNCATEGORIZED_COLOR, UNCATEGORIZED_LABEL,
};
pub use task::{CompletionPatch, CreateTaskRequest, NewTask, Task, UpdateTaskRequest};
pub use user::{Identity, Session};
