pub mod category;
pub mod priority;
pub mod task;

pub use category::Entity as Category;
pub use priority::Entity as Priority;
pub use task::Entity as Task;
