//! View synchronization core.
//!
//! This module keeps the derived views of the application coherent while the
//! [`DataSource`](crate::source::DataSource) completes operations
//! asynchronously and out of order:
//!
//! - [`filter`] - active category, search texts, status and priority filters
//! - [`category_index`] - per-category uncompleted counters, updated by point
//!   writes or rebuilt in full
//! - [`statistics`] - the four-count statistics tuple, joined behind a barrier
//! - [`synchronizer`] - decides which views to recompute after each action and
//!   sequences dependent reads after the mutations they depend on
//!
//! Facade calls run as spawned tokio tasks (see [`task_manager`]) and report
//! back as [`Action`]s on a channel. Only the [`ViewSynchronizer`] mutates
//! state, one action at a time, so no locking is involved; correctness is a
//! matter of ordering and of discarding superseded results.

pub mod actions;
pub mod category_index;
pub mod filter;
pub mod statistics;
pub mod synchronizer;
pub mod task_manager;
pub mod view;

pub use actions::Action;
pub use category_index::{sort_categories, CategoryCount, CategoryIndex, Ticket};
pub use filter::{FilterChange, FilterState, Filters};
pub use statistics::{Publish, Statistics, StatisticsAggregator};
pub use synchronizer::ViewSynchronizer;
pub use task_manager::TaskManager;
pub use view::{CategoryView, ViewSnapshot};
