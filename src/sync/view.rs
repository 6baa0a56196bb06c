use serde::Serialize;
use uuid::Uuid;

use super::filter::Filters;
use super::statistics::Statistics;
use crate::entities::{priority, task};
use crate::notices::Notice;

/// A category as listed in navigation, with its counter when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub id: Uuid,
    pub title: String,
    /// `None` until the index has received a count for this category.
    pub uncompleted: Option<u64>,
}

/// Everything the presentation layer renders, copied out of the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub tasks: Vec<task::Model>,
    pub categories: Vec<CategoryView>,
    pub priorities: Vec<priority::Model>,
    pub statistics: Option<Statistics>,
    pub filters: Filters,
    pub collapse_drawer: bool,
    pub notices: Vec<Notice>,
    pub in_flight: usize,
}

impl ViewSnapshot {
    pub fn category(&self, id: &Uuid) -> Option<&CategoryView> {
        self.categories.iter().find(|c| c.id == *id)
    }
}
