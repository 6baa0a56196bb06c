//! Scripted in-memory data source for synchronizer tests.
//!
//! Every call executes against the in-memory state immediately and then
//! delays its response by the duration returned from the installed delay
//! function. Tests run on a paused tokio clock, so delays only decide the
//! order in which responses arrive.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use categorist::entities::{category, priority, task};
use categorist::source::{DataSource, NewTask, SourceError, TaskQuery};
use categorist::sync::ViewSynchronizer;

/// A facade call as observed by the scripted source.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListPriorities,
    ListCategories,
    SearchCategories(String),
    AddCategory(String),
    UpdateCategory(Uuid),
    DeleteCategory(Uuid),
    SearchTasks(TaskQuery),
    AddTask(String),
    UpdateTask(Uuid),
    DeleteTask(Uuid),
    CountTotal(Option<Uuid>),
    CountCompleted(Option<Uuid>),
    CountUncompleted(Option<Uuid>),
    CountUncompletedTotal,
}

type Rule<T> = Arc<dyn Fn(&Call) -> T + Send + Sync>;

#[derive(Default)]
struct State {
    priorities: Vec<priority::Model>,
    categories: Vec<category::Model>,
    tasks: Vec<task::Model>,
    calls: Vec<Call>,
    clock: i64,
}

pub struct ScriptedSource {
    state: Mutex<State>,
    delay: Mutex<Rule<Duration>>,
    fail: Mutex<Rule<bool>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
            delay: Mutex::new(Arc::new(|_| Duration::from_millis(1))),
            fail: Mutex::new(Arc::new(|_| false)),
        })
    }

    pub fn set_delay(&self, rule: impl Fn(&Call) -> Duration + Send + Sync + 'static) {
        *self.delay.lock().unwrap() = Arc::new(rule);
    }

    pub fn set_failure(&self, rule: impl Fn(&Call) -> bool + Send + Sync + 'static) {
        *self.fail.lock().unwrap() = Arc::new(rule);
    }

    pub fn add_priority(&self, title: &str, weight: i32) -> priority::Model {
        let model = priority::Model {
            id: Uuid::new_v4(),
            title: title.to_string(),
            weight,
        };
        self.state.lock().unwrap().priorities.push(model.clone());
        model
    }

    pub fn add_category(&self, title: &str) -> category::Model {
        let model = category::Model {
            id: Uuid::new_v4(),
            title: title.to_string(),
        };
        self.state.lock().unwrap().categories.push(model.clone());
        model
    }

    pub fn add_task(&self, title: &str, category: Option<&category::Model>, completed: bool) -> task::Model {
        let mut state = self.state.lock().unwrap();
        let model = Self::make_task(&mut state, NewTask {
            title: title.to_string(),
            completed,
            priority_id: None,
            category_id: category.map(|c| c.id),
        });
        state.tasks.push(model.clone());
        model
    }

    pub fn tasks(&self) -> Vec<task::Model> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Uncompleted tasks in `category` as currently stored.
    pub fn uncompleted_in(&self, category: &category::Model) -> u64 {
        let state = self.state.lock().unwrap();
        state
            .tasks
            .iter()
            .filter(|t| t.category_id == Some(category.id) && !t.completed)
            .count() as u64
    }

    fn make_task(state: &mut State, args: NewTask) -> task::Model {
        state.clock += 1;
        task::Model {
            id: Uuid::new_v4(),
            title: args.title,
            completed: args.completed,
            created_at: Utc.timestamp_opt(1_700_000_000 + state.clock, 0).unwrap(),
            priority_id: args.priority_id,
            category_id: args.category_id,
        }
    }

    fn count(state: &State, category: Option<Uuid>, completed: Option<bool>) -> u64 {
        state
            .tasks
            .iter()
            .filter(|t| category.is_none() || t.category_id == category)
            .filter(|t| completed.map_or(true, |c| t.completed == c))
            .count() as u64
    }

    /// Record `call`, run `op` against the state right away, then delay the response.
    async fn respond<T>(
        &self,
        call: Call,
        op: impl FnOnce(&mut State) -> Result<T, SourceError>,
    ) -> Result<T, SourceError> {
        let delay = (self.delay.lock().unwrap().clone())(&call);
        let fail = (self.fail.lock().unwrap().clone())(&call);

        let result = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call.clone());
            if fail {
                Err(SourceError::Storage(format!("scripted failure: {call:?}")))
            } else {
                op(&mut state)
            }
        };

        tokio::time::sleep(delay).await;
        result
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn list_priorities(&self) -> Result<Vec<priority::Model>, SourceError> {
        self.respond(Call::ListPriorities, |s| Ok(s.priorities.clone())).await
    }

    async fn list_categories(&self) -> Result<Vec<category::Model>, SourceError> {
        self.respond(Call::ListCategories, |s| Ok(s.categories.clone())).await
    }

    async fn search_categories(&self, text: &str) -> Result<Vec<category::Model>, SourceError> {
        let needle = text.to_lowercase();
        self.respond(Call::SearchCategories(text.to_string()), move |s| {
            Ok(s.categories
                .iter()
                .filter(|c| c.title.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        })
        .await
    }

    async fn add_category(&self, title: &str) -> Result<category::Model, SourceError> {
        let title = title.to_string();
        self.respond(Call::AddCategory(title.clone()), move |s| {
            let model = category::Model { id: Uuid::new_v4(), title };
            s.categories.push(model.clone());
            Ok(model)
        })
        .await
    }

    async fn update_category(&self, category: category::Model) -> Result<(), SourceError> {
        self.respond(Call::UpdateCategory(category.id), move |s| {
            let existing = s
                .categories
                .iter_mut()
                .find(|c| c.id == category.id)
                .ok_or_else(|| SourceError::NotFound(format!("category {}", category.id)))?;
            *existing = category;
            Ok(())
        })
        .await
    }

    async fn delete_category(&self, id: Uuid) -> Result<category::Model, SourceError> {
        self.respond(Call::DeleteCategory(id), move |s| {
            let position = s
                .categories
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| SourceError::NotFound(format!("category {id}")))?;
            for task in s.tasks.iter_mut().filter(|t| t.category_id == Some(id)) {
                task.category_id = None;
            }
            Ok(s.categories.remove(position))
        })
        .await
    }

    async fn search_tasks(&self, query: &TaskQuery) -> Result<Vec<task::Model>, SourceError> {
        let query = query.clone();
        self.respond(Call::SearchTasks(query.clone()), move |s| {
            Ok(s.tasks.iter().filter(|t| query.matches(t)).cloned().collect())
        })
        .await
    }

    async fn add_task(&self, task: NewTask) -> Result<task::Model, SourceError> {
        self.respond(Call::AddTask(task.title.clone()), move |s| {
            let model = Self::make_task(s, task);
            s.tasks.push(model.clone());
            Ok(model)
        })
        .await
    }

    async fn update_task(&self, task: task::Model) -> Result<(), SourceError> {
        self.respond(Call::UpdateTask(task.id), move |s| {
            let existing = s
                .tasks
                .iter_mut()
                .find(|t| t.id == task.id)
                .ok_or_else(|| SourceError::NotFound(format!("task {}", task.id)))?;
            *existing = task;
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: Uuid) -> Result<task::Model, SourceError> {
        self.respond(Call::DeleteTask(id), move |s| {
            let position = s
                .tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| SourceError::NotFound(format!("task {id}")))?;
            Ok(s.tasks.remove(position))
        })
        .await
    }

    async fn count_total_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError> {
        self.respond(Call::CountTotal(category), move |s| Ok(Self::count(s, category, None)))
            .await
    }

    async fn count_completed_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError> {
        self.respond(Call::CountCompleted(category), move |s| Ok(Self::count(s, category, Some(true))))
            .await
    }

    async fn count_uncompleted_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError> {
        self.respond(Call::CountUncompleted(category), move |s| Ok(Self::count(s, category, Some(false))))
            .await
    }

    async fn count_uncompleted_total(&self) -> Result<u64, SourceError> {
        self.respond(Call::CountUncompletedTotal, |s| Ok(Self::count(s, None, Some(false))))
            .await
    }
}

/// Synchronizer over `source`, loaded and settled.
pub async fn loaded_synchronizer(source: &Arc<ScriptedSource>, compact_layout: bool) -> ViewSynchronizer {
    let mut synchronizer = ViewSynchronizer::new(source.clone() as Arc<dyn DataSource>, compact_layout);
    synchronizer.handle_action(categorist::sync::Action::Load);
    synchronizer.settle().await;
    synchronizer
}
