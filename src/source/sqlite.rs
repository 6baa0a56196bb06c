//! [`DataSource`] implementation over the local SQLite store.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use super::{DataSource, NewTask, SourceError, TaskQuery};
use crate::entities::{category, priority, task};
use crate::repositories::{CategoryRepository, PriorityRepository, TaskRepository};
use crate::storage::LocalStorage;

/// Facade over [`LocalStorage`]. Cheap to clone; clones share the connection.
#[derive(Clone)]
pub struct SqliteSource {
    storage: Arc<LocalStorage>,
}

impl SqliteSource {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Open the database at `database_url` and wrap it.
    pub async fn connect(database_url: &str) -> Result<Self, SourceError> {
        Ok(Self::new(LocalStorage::connect(database_url).await?))
    }

    fn storage_error(err: sea_orm::DbErr) -> SourceError {
        SourceError::Storage(err.to_string())
    }
}

#[async_trait]
impl DataSource for SqliteSource {
    async fn list_priorities(&self) -> Result<Vec<priority::Model>, SourceError> {
        Ok(PriorityRepository::get_all(&self.storage.conn).await?)
    }

    async fn list_categories(&self) -> Result<Vec<category::Model>, SourceError> {
        Ok(CategoryRepository::get_all(&self.storage.conn).await?)
    }

    async fn search_categories(&self, text: &str) -> Result<Vec<category::Model>, SourceError> {
        Ok(CategoryRepository::search(&self.storage.conn, text).await?)
    }

    async fn add_category(&self, title: &str) -> Result<category::Model, SourceError> {
        if title.trim().is_empty() {
            return Err(SourceError::InvalidData("category title cannot be empty".to_string()));
        }
        let created = CategoryRepository::create(&self.storage.conn, title).await?;
        info!("Created category {} '{}'", created.id, created.title);
        Ok(created)
    }

    async fn update_category(&self, category: category::Model) -> Result<(), SourceError> {
        if CategoryRepository::get_by_id(&self.storage.conn, &category.id)
            .await?
            .is_none()
        {
            return Err(SourceError::NotFound(format!("category {}", category.id)));
        }
        CategoryRepository::update(&self.storage.conn, category).await?;
        Ok(())
    }

    async fn delete_category(&self, id: Uuid) -> Result<category::Model, SourceError> {
        let txn = self.storage.conn.begin().await.map_err(Self::storage_error)?;

        let Some(category) = CategoryRepository::get_by_id(&txn, &id).await? else {
            return Err(SourceError::NotFound(format!("category {id}")));
        };
        let detached = TaskRepository::clear_category(&txn, &id).await?;
        CategoryRepository::delete(&txn, &id).await?;

        txn.commit().await.map_err(Self::storage_error)?;
        debug!("Deleted category {id}, {detached} tasks left uncategorised");
        Ok(category)
    }

    async fn search_tasks(&self, query: &TaskQuery) -> Result<Vec<task::Model>, SourceError> {
        Ok(TaskRepository::search(&self.storage.conn, query).await?)
    }

    async fn add_task(&self, task: NewTask) -> Result<task::Model, SourceError> {
        if task.title.trim().is_empty() {
            return Err(SourceError::InvalidData("task title cannot be empty".to_string()));
        }
        Ok(TaskRepository::create(&self.storage.conn, task).await?)
    }

    async fn update_task(&self, task: task::Model) -> Result<(), SourceError> {
        if TaskRepository::get_by_id(&self.storage.conn, &task.id).await?.is_none() {
            return Err(SourceError::NotFound(format!("task {}", task.id)));
        }
        TaskRepository::update(&self.storage.conn, task).await?;
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<task::Model, SourceError> {
        let Some(task) = TaskRepository::get_by_id(&self.storage.conn, &id).await? else {
            return Err(SourceError::NotFound(format!("task {id}")));
        };
        TaskRepository::delete(&self.storage.conn, &id).await?;
        Ok(task)
    }

    async fn count_total_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError> {
        Ok(TaskRepository::count(&self.storage.conn, category, None).await?)
    }

    async fn count_completed_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError> {
        Ok(TaskRepository::count(&self.storage.conn, category, Some(true)).await?)
    }

    async fn count_uncompleted_in_category(&self, category: Option<Uuid>) -> Result<u64, SourceError> {
        Ok(TaskRepository::count(&self.storage.conn, category, Some(false)).await?)
    }

    async fn count_uncompleted_total(&self) -> Result<u64, SourceError> {
        Ok(TaskRepository::count(&self.storage.conn, None, Some(false)).await?)
    }
}
