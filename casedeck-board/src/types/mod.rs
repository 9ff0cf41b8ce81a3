//! Core types for the board engine

mod ids;
mod priority;
mod status;
mod task;
mod user;

// Re-export all types
pub use ids::{MutationId, TaskId, UserId};
pub use priority::Priority;
pub use status::Status;
pub use task::{Task, TaskPatch};
pub use user::User;
