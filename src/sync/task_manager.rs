use std::future::Future;
use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::actions::Action;
use super::category_index::Ticket;
use super::statistics::Statistics;
use crate::entities::{category, task};
use crate::source::{DataSource, NewTask, TaskQuery};

#[derive(Debug)]
pub struct BackgroundTask {
    pub handle: JoinHandle<()>,
    pub description: String,
}

/// Dispatches facade calls as background tasks.
///
/// Every spawned operation posts exactly one completion [`Action`] on the
/// channel returned by [`TaskManager::new`]. The manager counts operations in
/// flight; the receiver side reports each completion back with
/// [`complete`](Self::complete).
pub struct TaskManager {
    source: Arc<dyn DataSource>,
    tasks: Vec<BackgroundTask>,
    next_task_id: u64,
    in_flight: usize,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(source: Arc<dyn DataSource>) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                source,
                tasks: Vec::new(),
                next_task_id: 1,
                in_flight: 0,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Sender for posting actions into the same queue as completions.
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_sender.clone()
    }

    /// Number of operations whose completion has not been reported yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Record that one completion action has been handled.
    pub fn complete(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    fn spawn<F, Fut>(&mut self, description: String, operation: F)
    where
        F: FnOnce(Arc<dyn DataSource>) -> Fut,
        Fut: Future<Output = Action> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;
        self.in_flight += 1;

        // Finished handles carry nothing; their action was already sent
        self.tasks.retain(|task| !task.handle.is_finished());

        debug!("Background: spawning operation {task_id} '{description}'");
        let action_sender = self.action_sender.clone();
        let operation = operation(Arc::clone(&self.source));
        let handle = tokio::spawn(async move {
            let action = operation.await;
            let _ = action_sender.send(action);
        });

        self.tasks.push(BackgroundTask { handle, description });
    }

    pub fn spawn_priorities_load(&mut self) {
        self.spawn("Load priorities".to_string(), |source| async move {
            Action::PrioritiesLoaded(source.list_priorities().await)
        })
    }

    /// Lists every category for an empty `text`, searches otherwise.
    pub fn spawn_category_search(&mut self, generation: u64, text: String) {
        self.spawn(format!("Search categories: '{text}'"), move |source| async move {
            let result = if text.is_empty() {
                source.list_categories().await
            } else {
                source.search_categories(&text).await
            };
            Action::CategoriesLoaded { generation, result }
        })
    }

    pub fn spawn_task_search(&mut self, generation: u64, query: TaskQuery) {
        self.spawn(format!("Search tasks: {query:?}"), move |source| async move {
            let result = source.search_tasks(&query).await;
            Action::TasksLoaded { generation, result }
        })
    }

    /// Fan out the four statistics counts and post one joined result.
    pub fn spawn_statistics(&mut self, generation: u64, category: Option<Uuid>) {
        self.spawn(format!("Statistics for {category:?}"), move |source| async move {
            let result = Statistics::collect(source.as_ref(), category).await;
            Action::StatisticsLoaded { generation, result }
        })
    }

    pub fn spawn_category_count(&mut self, category: category::Model, ticket: Ticket) {
        self.spawn(format!("Count category '{}'", category.title), move |source| async move {
            let result = source.count_uncompleted_in_category(Some(category.id)).await;
            Action::CategoryCounted {
                category,
                ticket,
                result,
            }
        })
    }

    pub fn spawn_add_task(&mut self, task: NewTask) {
        self.spawn(format!("Add task '{}'", task.title), move |source| async move {
            Action::TaskAdded(source.add_task(task).await)
        })
    }

    pub fn spawn_update_task(&mut self, task: task::Model) {
        self.spawn(format!("Update task {}", task.id), move |source| async move {
            Action::TaskUpdated(source.update_task(task).await)
        })
    }

    pub fn spawn_delete_task(&mut self, id: Uuid) {
        self.spawn(format!("Delete task {id}"), move |source| async move {
            Action::TaskDeleted(source.delete_task(id).await)
        })
    }

    pub fn spawn_add_category(&mut self, title: String) {
        self.spawn(format!("Add category '{title}'"), move |source| async move {
            Action::CategoryAdded(source.add_category(&title).await)
        })
    }

    pub fn spawn_update_category(&mut self, category: category::Model) {
        self.spawn(format!("Update category {}", category.id), move |source| async move {
            Action::CategoryUpdated(source.update_category(category).await)
        })
    }

    pub fn spawn_delete_category(&mut self, id: Uuid) {
        self.spawn(format!("Delete category {id}"), move |source| async move {
            Action::CategoryDeleted(source.delete_category(id).await)
        })
    }

    /// Descriptions of operations whose task has not finished yet.
    pub fn running(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|task| !task.handle.is_finished())
            .map(|task| task.description.as_str())
            .collect()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.handle.abort();
        }
        self.in_flight = 0;
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
