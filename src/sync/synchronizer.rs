use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::actions::Action;
use super::category_index::{sort_categories, CategoryIndex};
use super::filter::{FilterChange, FilterState};
use super::statistics::{Publish, Statistics, StatisticsAggregator};
use super::task_manager::TaskManager;
use super::view::{CategoryView, ViewSnapshot};
use crate::constants::{
    ERROR_CATEGORIES_LOAD_FAILED, ERROR_CATEGORY_CREATE_FAILED, ERROR_CATEGORY_DELETE_FAILED,
    ERROR_CATEGORY_UPDATE_FAILED, ERROR_COUNT_FAILED, ERROR_PRIORITIES_LOAD_FAILED, ERROR_STATISTICS_FAILED,
    ERROR_TASKS_LOAD_FAILED, ERROR_TASK_CREATE_FAILED, ERROR_TASK_DELETE_FAILED, ERROR_TASK_UPDATE_FAILED,
    SUCCESS_CATEGORY_CREATED, SUCCESS_CATEGORY_DELETED, SUCCESS_CATEGORY_UPDATED, SUCCESS_TASK_CREATED,
    SUCCESS_TASK_DELETED, SUCCESS_TASK_UPDATED,
};
use crate::entities::{category, priority, task};
use crate::notices::Notices;
use crate::source::{DataSource, SourceError};

/// Owner of every derived view.
///
/// User commands and facade completions are both [`Action`]s and are handled
/// strictly one at a time by [`handle_action`](Self::handle_action). Reads that
/// depend on a mutation are only issued from that mutation's completion
/// handler, never alongside the mutation itself.
pub struct ViewSynchronizer {
    task_manager: TaskManager,
    action_receiver: mpsc::UnboundedReceiver<Action>,
    filter: FilterState,
    index: CategoryIndex,
    statistics: StatisticsAggregator,
    categories: Vec<category::Model>,
    priorities: Vec<priority::Model>,
    tasks: Vec<task::Model>,
    notices: Notices,
    task_generation: u64,
    category_generation: u64,
    // Set when some pending category search must rebuild the index once its
    // latest generation lands, even if that generation did not ask for it.
    rebuild_pending: bool,
}

impl ViewSynchronizer {
    pub fn new(source: Arc<dyn DataSource>, compact_layout: bool) -> Self {
        let (task_manager, action_receiver) = TaskManager::new(source);
        Self {
            task_manager,
            action_receiver,
            filter: FilterState::new(compact_layout),
            index: CategoryIndex::new(),
            statistics: StatisticsAggregator::new(),
            categories: Vec::new(),
            priorities: Vec::new(),
            tasks: Vec::new(),
            notices: Notices::new(),
            task_generation: 0,
            category_generation: 0,
            rebuild_pending: false,
        }
    }

    /// Sender for queueing actions behind pending completions.
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.task_manager.action_sender()
    }

    /// Number of facade operations still in flight.
    pub fn in_flight(&self) -> usize {
        self.task_manager.in_flight()
    }

    pub fn is_settled(&self) -> bool {
        self.in_flight() == 0
    }

    /// Wait for the next queued action and handle it.
    ///
    /// Returns `false` once the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.action_receiver.recv().await {
            Some(action) => {
                self.handle_action(action);
                true
            }
            None => false,
        }
    }

    /// Handle completions until no operation is in flight.
    ///
    /// Waits forever on an operation that never completes.
    pub async fn settle(&mut self) {
        while !self.is_settled() {
            if !self.process_next().await {
                break;
            }
        }
    }

    /// Handle actions as they arrive. The task manager holds a sender, so
    /// this only returns if the channel is closed from outside.
    pub async fn run(&mut self) {
        while self.process_next().await {}
        debug!("Action channel closed, synchronizer stopping");
    }

    pub fn handle_action(&mut self, action: Action) {
        if action.is_completion() {
            self.task_manager.complete();
        }

        match action {
            Action::Load => {
                info!("Load: loading priorities, categories, tasks and statistics");
                self.task_manager.spawn_priorities_load();
                self.refresh_categories(true);
                self.refresh_tasks();
                self.recompute_statistics();
            }

            // Filters
            Action::SelectCategory(category) => {
                debug!("Filter: category -> {category:?}");
                let change = self.filter.select_category(category);
                self.apply_filter_change(change);
            }
            Action::SearchTasks(text) => {
                debug!("Filter: task search -> '{text}'");
                let change = self.filter.set_task_search(text);
                self.apply_filter_change(change);
            }
            Action::SearchCategories(text) => {
                debug!("Filter: category search -> '{text}'");
                let change = self.filter.set_category_search(text);
                self.apply_filter_change(change);
            }
            Action::FilterStatus(status) => {
                debug!("Filter: status -> {status:?}");
                let change = self.filter.set_status(status);
                self.apply_filter_change(change);
            }
            Action::FilterPriority(priority) => {
                debug!("Filter: priority -> {priority:?}");
                let change = self.filter.set_priority(priority);
                self.apply_filter_change(change);
            }

            // Task operations
            Action::AddTask(args) => {
                info!("Task: creating '{}' in category {:?}", args.title, args.category_id);
                self.task_manager.spawn_add_task(args);
            }
            Action::UpdateTask(task) => {
                info!("Task: updating {} '{}'", task.id, task.title);
                self.task_manager.spawn_update_task(task);
            }
            Action::DeleteTask(id) => {
                info!("Task: deleting {id}");
                self.task_manager.spawn_delete_task(id);
            }

            // Category operations
            Action::AddCategory(title) => {
                info!("Category: creating '{title}'");
                self.task_manager.spawn_add_category(title);
            }
            Action::UpdateCategory(category) => {
                info!("Category: updating {} -> '{}'", category.id, category.title);
                self.task_manager.spawn_update_category(category);
            }
            Action::DeleteCategory(id) => {
                info!("Category: deleting {id}");
                self.task_manager.spawn_delete_category(id);
            }

            // Mutation confirmations
            Action::TaskAdded(Ok(task)) => {
                info!("Task: created {} '{}'", task.id, task.title);
                self.notices.info(SUCCESS_TASK_CREATED);
                self.after_task_added_or_deleted(&task);
            }
            Action::TaskAdded(Err(err)) => self.report(ERROR_TASK_CREATE_FAILED, &err),
            Action::TaskDeleted(Ok(task)) => {
                info!("Task: deleted {} '{}'", task.id, task.title);
                self.notices.info(SUCCESS_TASK_DELETED);
                // The facade hands back the deleted task, category included
                self.after_task_added_or_deleted(&task);
            }
            Action::TaskDeleted(Err(err)) => self.report(ERROR_TASK_DELETE_FAILED, &err),
            Action::TaskUpdated(Ok(())) => {
                self.notices.info(SUCCESS_TASK_UPDATED);
                // The task may have moved between categories; recount them all
                self.refresh_tasks();
                self.recount_all_categories();
                self.recompute_statistics();
            }
            Action::TaskUpdated(Err(err)) => self.report(ERROR_TASK_UPDATE_FAILED, &err),
            Action::CategoryAdded(Ok(category)) => {
                info!("Category: created {} '{}'", category.id, category.title);
                self.notices.info(SUCCESS_CATEGORY_CREATED);
                self.refresh_categories(true);
            }
            Action::CategoryAdded(Err(err)) => self.report(ERROR_CATEGORY_CREATE_FAILED, &err),
            Action::CategoryUpdated(Ok(())) => {
                self.notices.info(SUCCESS_CATEGORY_UPDATED);
                self.refresh_categories(true);
            }
            Action::CategoryUpdated(Err(err)) => self.report(ERROR_CATEGORY_UPDATE_FAILED, &err),
            Action::CategoryDeleted(Ok(category)) => {
                info!("Category: deleted {} '{}'", category.id, category.title);
                self.notices.info(SUCCESS_CATEGORY_DELETED);
                self.filter.reset_category();
                self.index.delete(&category.id);
                self.categories.retain(|c| c.id != category.id);
                self.refresh_categories(false);
                self.refresh_tasks();
                self.recompute_statistics();
            }
            Action::CategoryDeleted(Err(err)) => self.report(ERROR_CATEGORY_DELETE_FAILED, &err),

            // Read completions
            Action::PrioritiesLoaded(Ok(priorities)) => {
                debug!("Data: loaded {} priorities", priorities.len());
                self.priorities = priorities;
            }
            Action::PrioritiesLoaded(Err(err)) => self.report(ERROR_PRIORITIES_LOAD_FAILED, &err),
            Action::CategoriesLoaded { generation, result } => {
                if generation != self.category_generation {
                    debug!("Data: dropping superseded category search #{generation}");
                    return;
                }
                match result {
                    Ok(mut categories) => {
                        categories.retain(|c| !self.index.is_deleted(&c.id));
                        sort_categories(&mut categories);
                        debug!("Data: loaded {} categories", categories.len());
                        if std::mem::take(&mut self.rebuild_pending) {
                            self.rebuild_index(&categories);
                        }
                        self.categories = categories;
                    }
                    Err(err) => self.report(ERROR_CATEGORIES_LOAD_FAILED, &err),
                }
            }
            Action::TasksLoaded { generation, result } => {
                if generation != self.task_generation {
                    debug!("Data: dropping superseded task search #{generation}");
                    return;
                }
                match result {
                    Ok(tasks) => {
                        debug!("Data: loaded {} tasks", tasks.len());
                        self.tasks = tasks;
                    }
                    Err(err) => self.report(ERROR_TASKS_LOAD_FAILED, &err),
                }
            }
            Action::StatisticsLoaded { generation, result } => match self.statistics.publish(generation, result) {
                Publish::Published => debug!("Data: statistics #{generation} published"),
                Publish::Superseded => debug!("Data: dropping superseded statistics #{generation}"),
                Publish::Failed(err) => self.report(ERROR_STATISTICS_FAILED, &err),
            },
            Action::CategoryCounted {
                category,
                ticket,
                result,
            } => match result {
                Ok(count) => {
                    if !self.index.apply(&category, count, ticket) {
                        debug!("Data: dropping stale count for '{}' (ticket {ticket})", category.title);
                    }
                }
                Err(err) if self.index.is_stale(&category, ticket) => {
                    debug!("Data: dropping stale count failure for '{}': {err}", category.title);
                }
                Err(err) => self.report(&format!("{ERROR_COUNT_FAILED} '{}'", category.title), &err),
            },
        }
    }

    /// Point recount of the affected category, chained after the confirmed
    /// mutation; the list and statistics refresh independently of it.
    fn after_task_added_or_deleted(&mut self, task: &task::Model) {
        self.recount_category_of(task);
        self.refresh_tasks();
        self.recompute_statistics();
    }

    fn apply_filter_change(&mut self, change: FilterChange) {
        match change {
            FilterChange::Tasks => {
                self.refresh_tasks();
                self.recompute_statistics();
            }
            FilterChange::Categories => {
                self.refresh_categories(false);
                self.refresh_tasks();
                self.recompute_statistics();
            }
        }
    }

    fn refresh_tasks(&mut self) {
        self.task_generation += 1;
        self.task_manager
            .spawn_task_search(self.task_generation, self.filter.to_query());
    }

    fn refresh_categories(&mut self, rebuild_index: bool) {
        self.category_generation += 1;
        self.rebuild_pending |= rebuild_index;
        self.task_manager
            .spawn_category_search(self.category_generation, self.filter.category_search().to_string());
    }

    fn recompute_statistics(&mut self) {
        let generation = self.statistics.begin();
        self.task_manager
            .spawn_statistics(generation, self.filter.selected_category());
    }

    fn rebuild_index(&mut self, categories: &[category::Model]) {
        debug!("Index: rebuilding for {} categories", categories.len());
        for (category, ticket) in self.index.rebuild(categories) {
            self.task_manager.spawn_category_count(category, ticket);
        }
    }

    fn recount_all_categories(&mut self) {
        for category in self.categories.clone() {
            let ticket = self.index.issue_ticket();
            self.task_manager.spawn_category_count(category, ticket);
        }
    }

    fn recount_category_of(&mut self, task: &task::Model) {
        let Some(category_id) = task.category_id else {
            return;
        };
        match self.known_category(&category_id) {
            Some(category) => {
                let ticket = self.index.issue_ticket();
                self.task_manager.spawn_category_count(category, ticket);
            }
            None => debug!("Index: skipping recount for unknown category {category_id}"),
        }
    }

    fn known_category(&self, id: &Uuid) -> Option<category::Model> {
        if self.index.is_deleted(id) {
            return None;
        }
        self.index
            .get(id)
            .or_else(|| self.categories.iter().find(|c| c.id == *id))
            .cloned()
    }

    fn report(&mut self, context: &str, err: &SourceError) {
        warn!("{context}: {err}");
        self.notices.error(format!("{context}: {err}"));
    }

    pub fn tasks(&self) -> &[task::Model] {
        &self.tasks
    }

    pub fn categories(&self) -> &[category::Model] {
        &self.categories
    }

    pub fn priorities(&self) -> &[priority::Model] {
        &self.priorities
    }

    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.statistics.current()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Consume the pending request to close the navigation drawer.
    pub fn take_collapse_drawer(&mut self) -> bool {
        self.filter.take_collapse_drawer()
    }

    /// Read-only copy of every view for the presentation layer.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            tasks: self.tasks.clone(),
            categories: self
                .categories
                .iter()
                .map(|category| CategoryView {
                    id: category.id,
                    title: category.title.clone(),
                    uncompleted: self.index.count(&category.id),
                })
                .collect(),
            priorities: self.priorities.clone(),
            statistics: self.statistics.current(),
            filters: self.filter.filters().clone(),
            collapse_drawer: self.filter.collapse_drawer_pending(),
            notices: self.notices.latest_first(),
            in_flight: self.in_flight(),
        }
    }
}
