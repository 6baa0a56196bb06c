//! Category repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::category;

/// Repository for category-related database operations.
pub struct CategoryRepository;

impl CategoryRepository {
    /// Get all categories ordered by title.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<category::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Title)
            .all(conn)
            .await?)
    }

    /// Categories whose title contains `text` (SQLite `LIKE`, case-insensitive for ASCII).
    pub async fn search<C>(conn: &C, text: &str) -> Result<Vec<category::Model>>
    where
        C: ConnectionTrait,
    {
        if text.is_empty() {
            return Self::get_all(conn).await;
        }
        Ok(category::Entity::find()
            .filter(category::Column::Title.contains(text))
            .order_by_asc(category::Column::Title)
            .all(conn)
            .await?)
    }

    /// Get a single category by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<category::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::find_by_id(*id).one(conn).await?)
    }

    /// Insert a new category with a fresh id.
    pub async fn create<C>(conn: &C, title: &str) -> Result<category::Model>
    where
        C: ConnectionTrait,
    {
        let model = category::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(title.to_string()),
        };
        Ok(model.insert(conn).await?)
    }

    /// Overwrite the title of an existing category.
    pub async fn update<C>(conn: &C, category: category::Model) -> Result<category::Model>
    where
        C: ConnectionTrait,
    {
        let model = category::ActiveModel {
            id: ActiveValue::Unchanged(category.id),
            title: ActiveValue::Set(category.title),
        };
        Ok(model.update(conn).await?)
    }

    /// Delete a category by id.
    pub async fn delete<C>(conn: &C, id: &Uuid) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(category::Entity::delete_by_id(*id).exec(conn).await?.rows_affected)
    }
}
