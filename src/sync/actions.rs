use uuid::Uuid;

use super::category_index::Ticket;
use super::statistics::Statistics;
use crate::entities::{category, priority, task};
use crate::source::{NewTask, SourceError, StatusFilter};

#[derive(Debug, Clone)]
pub enum Action {
    // Initial load of every view
    Load,

    // Filters
    SelectCategory(Option<Uuid>),
    SearchTasks(String),
    SearchCategories(String),
    FilterStatus(Option<StatusFilter>),
    FilterPriority(Option<Uuid>),

    // Task operations
    AddTask(NewTask),
    UpdateTask(task::Model),
    DeleteTask(Uuid),

    // Category operations
    AddCategory(String),
    UpdateCategory(category::Model),
    DeleteCategory(Uuid),

    // Facade completions
    PrioritiesLoaded(Result<Vec<priority::Model>, SourceError>),
    CategoriesLoaded {
        generation: u64,
        result: Result<Vec<category::Model>, SourceError>,
    },
    TasksLoaded {
        generation: u64,
        result: Result<Vec<task::Model>, SourceError>,
    },
    StatisticsLoaded {
        generation: u64,
        result: Result<Statistics, SourceError>,
    },
    CategoryCounted {
        category: category::Model,
        ticket: Ticket,
        result: Result<u64, SourceError>,
    },
    TaskAdded(Result<task::Model, SourceError>),
    TaskUpdated(Result<(), SourceError>),
    TaskDeleted(Result<task::Model, SourceError>),
    CategoryAdded(Result<category::Model, SourceError>),
    CategoryUpdated(Result<(), SourceError>),
    CategoryDeleted(Result<category::Model, SourceError>),
}

impl Action {
    /// Whether this action reports the completion of a facade call.
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Action::PrioritiesLoaded(_)
                | Action::CategoriesLoaded { .. }
                | Action::TasksLoaded { .. }
                | Action::StatisticsLoaded { .. }
                | Action::CategoryCounted { .. }
                | Action::TaskAdded(_)
                | Action::TaskUpdated(_)
                | Action::TaskDeleted(_)
                | Action::CategoryAdded(_)
                | Action::CategoryUpdated(_)
                | Action::CategoryDeleted(_)
        )
    }
}
