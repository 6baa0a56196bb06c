//! Priority repository for database operations.

use anyhow::Result;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::priority;

/// Repository for priority reference data.
pub struct PriorityRepository;

impl PriorityRepository {
    /// Get all priorities, heaviest first.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<priority::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(priority::Entity::find()
            .order_by_desc(priority::Column::Weight)
            .all(conn)
            .await?)
    }
}
