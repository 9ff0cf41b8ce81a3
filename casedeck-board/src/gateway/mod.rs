//! Persistence gateway boundary
//!
//! The board core never talks to a backend directly. Everything flows
//! through [`TaskGateway`], so the same engine runs against the in-memory
//! implementation in tests and a remote HTTP client in production.

mod memory;

pub use memory::{GatewayOp, MemoryGateway};

use crate::error::Result;
use crate::types::{Status, Task, TaskId, TaskPatch};
use async_trait::async_trait;

/// Async persistence boundary for task records
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Fetch all live (non-archived) tasks
    async fn list(&self) -> Result<Vec<Task>>;

    /// Fetch a single task by ID, archived or not
    async fn get(&self, id: &TaskId) -> Result<Task>;

    /// Create a task from the given fields, returning the stored record
    async fn create(&self, patch: &TaskPatch) -> Result<Task>;

    /// Update fields of an existing task, returning the stored record
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task>;

    /// Move a task to a status column. `index` is the target position
    /// within the column; `None` appends at the end. Returns the stored
    /// record with the index the server actually assigned.
    async fn update_status(&self, id: &TaskId, status: Status, index: Option<i64>) -> Result<Task>;

    /// Soft-delete a task
    async fn archive(&self, id: &TaskId) -> Result<()>;

    /// Bring an archived task back to its status column
    async fn restore(&self, id: &TaskId) -> Result<()>;

    /// Fetch archived tasks, optionally filtered by a case-insensitive
    /// title substring
    async fn list_archived(&self, search: Option<&str>) -> Result<Vec<Task>>;
}
