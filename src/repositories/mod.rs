//! Repository layer for database operations.
//!
//! Repository structs encapsulate the sea-orm queries for each entity and keep
//! the entity modules as pure data models.

pub mod category;
pub mod priority;
pub mod task;

pub use category::CategoryRepository;
pub use priority::PriorityRepository;
pub use task::TaskRepository;
