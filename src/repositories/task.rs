//! Task repository for database operations.

use anyhow::Result;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::entities::task;
use crate::source::{NewTask, TaskQuery};

/// Repository for task-related database operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Tasks matching every populated field of `query`, newest first.
    pub async fn search<C>(conn: &C, query: &TaskQuery) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        let mut condition = Condition::all();
        if let Some(category_id) = query.category {
            condition = condition.add(task::Column::CategoryId.eq(category_id));
        }
        if !query.text.is_empty() {
            condition = condition.add(task::Column::Title.contains(query.text.as_str()));
        }
        if let Some(status) = query.status {
            condition = condition.add(task::Column::Completed.eq(status.completed()));
        }
        if let Some(priority_id) = query.priority {
            condition = condition.add(task::Column::PriorityId.eq(priority_id));
        }

        Ok(task::Entity::find()
            .filter(condition)
            .order_by_desc(task::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get a single task by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find_by_id(*id).one(conn).await?)
    }

    /// Insert a new task stamped with the current time.
    pub async fn create<C>(conn: &C, args: NewTask) -> Result<task::Model>
    where
        C: ConnectionTrait,
    {
        let model = task::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(args.title),
            completed: ActiveValue::Set(args.completed),
            created_at: ActiveValue::Set(Utc::now()),
            priority_id: ActiveValue::Set(args.priority_id),
            category_id: ActiveValue::Set(args.category_id),
        };
        Ok(model.insert(conn).await?)
    }

    /// Overwrite every mutable field of an existing task.
    pub async fn update<C>(conn: &C, task: task::Model) -> Result<task::Model>
    where
        C: ConnectionTrait,
    {
        let model = task::ActiveModel {
            id: ActiveValue::Unchanged(task.id),
            title: ActiveValue::Set(task.title),
            completed: ActiveValue::Set(task.completed),
            created_at: ActiveValue::Unchanged(task.created_at),
            priority_id: ActiveValue::Set(task.priority_id),
            category_id: ActiveValue::Set(task.category_id),
        };
        Ok(model.update(conn).await?)
    }

    /// Delete a task by id.
    pub async fn delete<C>(conn: &C, id: &Uuid) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::delete_by_id(*id).exec(conn).await?.rows_affected)
    }

    /// Detach every task from `category_id`, leaving them uncategorised.
    pub async fn clear_category<C>(conn: &C, category_id: &Uuid) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::update_many()
            .col_expr(task::Column::CategoryId, Expr::value(Option::<Uuid>::None))
            .filter(task::Column::CategoryId.eq(*category_id))
            .exec(conn)
            .await?
            .rows_affected)
    }

    /// Count tasks in `category` (all categories when `None`), optionally by completion.
    pub async fn count<C>(conn: &C, category: Option<Uuid>, completed: Option<bool>) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let mut select = task::Entity::find();
        if let Some(category_id) = category {
            select = select.filter(task::Column::CategoryId.eq(category_id));
        }
        if let Some(completed) = completed {
            select = select.filter(task::Column::Completed.eq(completed));
        }
        Ok(select.count(conn).await?)
    }
}
