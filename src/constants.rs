//! Constants used throughout the application
//!
//! This module centralizes notice texts, defaults and other constant values
//! to improve maintainability and consistency.

// Success Messages
pub const SUCCESS_TASK_CREATED: &str = "✅ Task created";
pub const SUCCESS_TASK_UPDATED: &str = "✅ Task updated";
pub const SUCCESS_TASK_DELETED: &str = "✅ Task deleted";
pub const SUCCESS_CATEGORY_CREATED: &str = "✅ Category created";
pub const SUCCESS_CATEGORY_UPDATED: &str = "✅ Category updated";
pub const SUCCESS_CATEGORY_DELETED: &str = "✅ Category deleted";

// Error Messages
pub const ERROR_TASK_CREATE_FAILED: &str = "❌ Failed to create task";
pub const ERROR_TASK_UPDATE_FAILED: &str = "❌ Failed to update task";
pub const ERROR_TASK_DELETE_FAILED: &str = "❌ Failed to delete task";
pub const ERROR_CATEGORY_CREATE_FAILED: &str = "❌ Failed to create category";
pub const ERROR_CATEGORY_UPDATE_FAILED: &str = "❌ Failed to update category";
pub const ERROR_CATEGORY_DELETE_FAILED: &str = "❌ Failed to delete category";
pub const ERROR_TASKS_LOAD_FAILED: &str = "❌ Failed to load tasks";
pub const ERROR_CATEGORIES_LOAD_FAILED: &str = "❌ Failed to load categories";
pub const ERROR_PRIORITIES_LOAD_FAILED: &str = "❌ Failed to load priorities";
pub const ERROR_COUNT_FAILED: &str = "❌ Failed to count tasks in category";
pub const ERROR_STATISTICS_FAILED: &str = "❌ Failed to load statistics";

// Configuration
pub const CONFIG_FILE_NAME: &str = "categorist.toml";
pub const CONFIG_DIR_NAME: &str = "categorist";
pub const CONFIG_GENERATED: &str = "Configuration file generated";
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const LOG_FILE_NAME: &str = "categorist.log";

/// Priorities inserted into an empty database: (title, weight).
pub const DEFAULT_PRIORITIES: &[(&str, i32)] = &[("Low", 1), ("Medium", 2), ("High", 3)];

/// Upper bound on retained notices; older entries are dropped first.
pub const MAX_NOTICES: usize = 100;
