//! Per-category uncompleted-task counters.
//!
//! Counts arrive asynchronously, each stamped with a [`Ticket`] taken when the
//! count query was issued. A result is written only if no later-issued query
//! has already written the entry and it was issued after the last rebuild, so
//! a slow, older count can never overwrite a fresher one. Deleted categories
//! are remembered and rejected for the lifetime of the index.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::entities::category;

/// Issue order of a count query. Larger is newer.
pub type Ticket = u64;

/// A category together with its uncompleted-task count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: category::Model,
    pub count: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    category: category::Model,
    count: u64,
    ticket: Ticket,
}

#[derive(Debug, Default)]
pub struct CategoryIndex {
    // Insertion order; ties in the title sort keep this order.
    entries: Vec<Entry>,
    deleted: HashSet<Uuid>,
    last_ticket: Ticket,
    // Results from tickets below this were issued before the last rebuild.
    floor: Ticket,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the ticket for a count query about to be issued.
    pub fn issue_ticket(&mut self) -> Ticket {
        self.last_ticket += 1;
        self.last_ticket
    }

    /// Replace the count for `category`, adding it when absent.
    ///
    /// Returns `false` when the category was deleted from the index.
    pub fn set(&mut self, category: &category::Model, count: u64) -> bool {
        let ticket = self.issue_ticket();
        self.apply(category, count, ticket)
    }

    /// Write a count produced by the query stamped `ticket`.
    ///
    /// Returns `false` and leaves the index untouched when the result is stale:
    /// the category was deleted, a rebuild happened after the query was
    /// issued, or a newer query already wrote this entry.
    pub fn apply(&mut self, category: &category::Model, count: u64, ticket: Ticket) -> bool {
        if self.is_stale(category, ticket) {
            return false;
        }

        match self.entries.iter_mut().find(|e| e.category.id == category.id) {
            Some(entry) if entry.ticket > ticket => false,
            Some(entry) => {
                entry.category = category.clone();
                entry.count = count;
                entry.ticket = ticket;
                true
            }
            None => {
                self.entries.push(Entry {
                    category: category.clone(),
                    count,
                    ticket,
                });
                true
            }
        }
    }

    /// Remove the entry for `id` and reject any later write for it.
    pub fn delete(&mut self, id: &Uuid) -> Option<CategoryCount> {
        self.deleted.insert(*id);
        let position = self.entries.iter().position(|e| e.category.id == *id)?;
        let entry = self.entries.remove(position);
        Some(CategoryCount {
            category: entry.category,
            count: entry.count,
        })
    }

    /// Clear every entry and reserve one ticket per category to recount.
    ///
    /// The caller issues a count query per returned pair and feeds each result
    /// to [`apply`](Self::apply); the index fills up incrementally.
    pub fn rebuild(&mut self, categories: &[category::Model]) -> Vec<(category::Model, Ticket)> {
        self.entries.clear();
        self.floor = self.last_ticket + 1;

        let mut requests = Vec::with_capacity(categories.len());
        for category in categories {
            if self.deleted.contains(&category.id) {
                continue;
            }
            let ticket = self.issue_ticket();
            requests.push((category.clone(), ticket));
        }
        requests
    }

    /// Whether a result for `category` stamped `ticket` can no longer be written,
    /// because the category was deleted or a rebuild came after the ticket.
    pub fn is_stale(&self, category: &category::Model, ticket: Ticket) -> bool {
        ticket < self.floor || self.deleted.contains(&category.id)
    }

    pub fn count(&self, id: &Uuid) -> Option<u64> {
        self.entries.iter().find(|e| e.category.id == *id).map(|e| e.count)
    }

    pub fn get(&self, id: &Uuid) -> Option<&category::Model> {
        self.entries.iter().find(|e| e.category.id == *id).map(|e| &e.category)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.entries.iter().any(|e| e.category.id == *id)
    }

    pub fn is_deleted(&self, id: &Uuid) -> bool {
        self.deleted.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by title (see [`sort_categories`]).
    pub fn entries(&self) -> Vec<CategoryCount> {
        let mut entries: Vec<CategoryCount> = self
            .entries
            .iter()
            .map(|e| CategoryCount {
                category: e.category.clone(),
                count: e.count,
            })
            .collect();
        entries.sort_by_cached_key(|e| e.category.title.to_lowercase());
        entries
    }
}

/// Sort categories by title, case-insensitively and stably.
pub fn sort_categories(categories: &mut [category::Model]) {
    categories.sort_by_cached_key(|c| c.title.to_lowercase());
}
