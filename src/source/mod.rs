//! Data access facade consumed by the synchronization core.
//!
//! The core never talks to storage directly. Every read, write and count goes
//! through [`DataSource`], whose operations complete asynchronously and
//! independently of each other: two calls issued back to back may resolve in
//! either order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{category, priority, task};

pub mod sqlite;

pub use sqlite::SqliteSource;

/// Error types for facade operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Source error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for SourceError {
    fn from(err: anyhow::Error) -> Self {
        SourceError::Storage(format!("{err:#}"))
    }
}

/// Status filter applied to the task list. `None` at the call site means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Completed,
    Uncompleted,
}

impl StatusFilter {
    /// The completion flag a task must carry to pass this filter.
    pub fn completed(self) -> bool {
        matches!(self, StatusFilter::Completed)
    }
}

/// Conjunctive task filter: every populated field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    /// `None` selects every category.
    pub category: Option<Uuid>,
    /// Case-insensitive substring of the title; empty matches everything.
    pub text: String,
    pub status: Option<StatusFilter>,
    pub priority: Option<Uuid>,
}

impl TaskQuery {
    /// Whether `task` passes every filter of this query.
    pub fn matches(&self, task: &task::Model) -> bool {
        if self.category.is_some() && task.category_id != self.category {
            return false;
        }
        if let Some(status) = self.status {
            if task.completed != status.completed() {
                return false;
            }
        }
        if self.priority.is_some() && task.priority_id != self.priority {
            return false;
        }
        self.text.is_empty() || task.title.to_lowercase().contains(&self.text.to_lowercase())
    }
}

/// Arguments for creating a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub completed: bool,
    pub priority_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_priority(mut self, priority_id: Uuid) -> Self {
        self.priority_id = Some(priority_id);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Storage facade for tasks, categories and priorities.
///
/// Implementations must be safe to call concurrently; the synchronizer
/// dispatches independent calls without waiting for earlier ones.
#[async_trait]
pub trait DataSource: Send + Sync {
    // Reference data
    async fn list_priorities(&self) -> Result<Vec<priority::Model>, SourceError>;

    // Categories
    async fn list_categories(&self) -> Result<Vec<category::Model>, SourceError>;
    async fn search_categories(&self, text: &str) -> Result<Vec<category::Model>, SourceError>;
    async fn add_category(&self, title: &str) -> Result<category::Model, SourceError>;
    async fn update_category(&self, category: category::Model) -> Result<(), SourceError>;
    /// Returns the deleted category so callers can key follow-up updates on it.
    async fn delete_category(&self, id: Uuid) -> Result<category::Model, SourceError>;

    // Tasks
    async fn search_tasks(&self, query: &TaskQuery) -> Result<Vec<task::Model>, SourceError>;
    async fn add_task(&self, task: NewTask) -> Result<task::Model, SourceError>;
    async fn update_task(&self, task: task::Model) -> Result<(), SourceError>;
    /// Returns the deleted task, including the category it belonged to.
    async fn delete_task(&self, id: Uuid) -> Result<task::Model, SourceError>;

    // Counts
    async fn count_total_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError>;
    async fn count_completed_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError>;
    async fn count_uncompleted_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError>;
    async fn count_uncompleted_total(&self) -> Result<u64, SourceError>;
}
