//! Local storage module backing the SQLite data source.
//!
//! This module owns the sea-orm connection and the schema bootstrap for:
//! - Priorities (seeded reference data)
//! - Categories
//! - Tasks

pub mod db;

pub use db::LocalStorage;
