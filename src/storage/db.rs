use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use uuid::Uuid;

use crate::constants::DEFAULT_PRIORITIES;
use crate::entities::{category, priority, task};
use crate::repositories::PriorityRepository;

/// Connection pool lifetime; long enough that an in-memory database is never
/// dropped by connection recycling.
const CONNECTION_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Local storage manager backed by SQLite through sea-orm.
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open `database_url`, create missing tables and seed priorities.
    ///
    /// A single pooled connection is used so that `sqlite::memory:` keeps one
    /// database for the whole lifetime of the storage.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(CONNECTION_LIFETIME)
            .max_lifetime(CONNECTION_LIFETIME)
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to open database: {database_url}"))?;

        let storage = Self { conn };
        storage.init_schema().await?;
        storage.seed_priorities().await?;
        Ok(storage)
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        // Referenced tables first so foreign keys resolve
        let mut priorities = schema.create_table_from_entity(priority::Entity);
        priorities.if_not_exists();
        self.conn
            .execute(backend.build(&priorities))
            .await
            .context("Failed to create priorities table")?;

        let mut categories = schema.create_table_from_entity(category::Entity);
        categories.if_not_exists();
        self.conn
            .execute(backend.build(&categories))
            .await
            .context("Failed to create categories table")?;

        let mut tasks = schema.create_table_from_entity(task::Entity);
        tasks.if_not_exists();
        self.conn
            .execute(backend.build(&tasks))
            .await
            .context("Failed to create tasks table")?;

        Ok(())
    }

    /// Insert the default priorities when the table is empty.
    async fn seed_priorities(&self) -> Result<()> {
        if !PriorityRepository::get_all(&self.conn).await?.is_empty() {
            return Ok(());
        }

        for (title, weight) in DEFAULT_PRIORITIES {
            priority::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                title: ActiveValue::Set((*title).to_string()),
                weight: ActiveValue::Set(*weight),
            }
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to seed priority '{title}'"))?;
        }

        info!("Seeded {} default priorities", DEFAULT_PRIORITIES.len());
        Ok(())
    }
}
