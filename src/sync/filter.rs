use serde::Serialize;
use uuid::Uuid;

use crate::source::{StatusFilter, TaskQuery};

/// Which derived views a filter change invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    /// Task list and statistics are stale.
    Tasks,
    /// The category list is stale, along with the task list and statistics.
    Categories,
}

/// Current filter values as shown to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    /// `None` is the "All categories" pseudo-category.
    pub category: Option<Uuid>,
    pub task_search: String,
    pub category_search: String,
    pub status: Option<StatusFilter>,
    pub priority: Option<Uuid>,
}

/// Holds the active filters. Setters only record values; they never do I/O.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    filters: Filters,
    compact_layout: bool,
    collapse_drawer: bool,
}

impl FilterState {
    pub fn new(compact_layout: bool) -> Self {
        Self {
            compact_layout,
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn selected_category(&self) -> Option<Uuid> {
        self.filters.category
    }

    pub fn category_search(&self) -> &str {
        &self.filters.category_search
    }

    /// Select a category (`None` for all). On compact layouts this also asks
    /// the presentation layer to close its navigation drawer.
    pub fn select_category(&mut self, category: Option<Uuid>) -> FilterChange {
        self.filters.category = category;
        if self.compact_layout {
            self.collapse_drawer = true;
        }
        FilterChange::Tasks
    }

    /// Point the view back at "All" without any drawer side effect.
    pub fn reset_category(&mut self) {
        self.filters.category = None;
    }

    pub fn set_task_search(&mut self, text: impl Into<String>) -> FilterChange {
        self.filters.task_search = text.into();
        FilterChange::Tasks
    }

    pub fn set_category_search(&mut self, text: impl Into<String>) -> FilterChange {
        self.filters.category_search = text.into();
        FilterChange::Categories
    }

    pub fn set_status(&mut self, status: Option<StatusFilter>) -> FilterChange {
        self.filters.status = status;
        FilterChange::Tasks
    }

    pub fn set_priority(&mut self, priority: Option<Uuid>) -> FilterChange {
        self.filters.priority = priority;
        FilterChange::Tasks
    }

    pub fn collapse_drawer_pending(&self) -> bool {
        self.collapse_drawer
    }

    /// Consume the pending drawer-collapse request.
    pub fn take_collapse_drawer(&mut self) -> bool {
        std::mem::take(&mut self.collapse_drawer)
    }

    /// The task query for the current filter combination.
    pub fn to_query(&self) -> TaskQuery {
        TaskQuery {
            category: self.filters.category,
            text: self.filters.task_search.clone(),
            status: self.filters.status,
            priority: self.filters.priority,
        }
    }
}
