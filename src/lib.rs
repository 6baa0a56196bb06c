//! Categorist - view synchronization for a category-based task manager
//!
//! This library keeps the derived views of a task manager (the filtered task
//! list, per-category counters and aggregate statistics) consistent while the
//! underlying data source completes operations asynchronously and in any
//! order.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`source`] - Data access facade and its SQLite implementation
//! * [`storage`] - Local database connection and schema
//! * [`sync`] - Filter state, category index, statistics and the view synchronizer

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup
pub mod logger;

/// Notices surfaced to the presentation layer
pub mod notices;

/// Repository layer for database operations
pub mod repositories;

/// Data access facade
pub mod source;

/// Local storage layer
pub mod storage;

/// View synchronization core
pub mod sync;

// Re-export entity models for convenient access
pub use entities::{category, priority, task};
