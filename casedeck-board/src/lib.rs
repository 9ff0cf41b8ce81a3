//! Task board engine with optimistic updates
//!
//! This crate implements the drag-and-drop task board at the heart of the
//! case administration tool: six fixed status columns, priority-major
//! ordering, archive as soft-delete, and a persistence gateway behind an
//! async trait. All mutations are applied optimistically; the server
//! record is merged back when the write settles, and any failure rolls the
//! board back by reloading.
//!
//! ## Overview
//!
//! - **One store, one writer** - [`TaskStore`] holds the live tasks;
//!   only the [`UpdateCoordinator`] and reloads write to it
//! - **Pure views** - column sorting and filtering never mutate, so
//!   renderers can recompute on every change
//! - **Gateway boundary** - the same engine runs against
//!   [`MemoryGateway`](gateway::MemoryGateway) in tests and an HTTP
//!   client in production
//! - **Drags become mutations** - a finished drag session yields at most
//!   one [`Mutation`], decided against the store at drop time
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use casedeck_board::gateway::MemoryGateway;
//! use casedeck_board::{BoardFilter, Status, TaskBoard};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let board = TaskBoard::new(Arc::new(MemoryGateway::new()));
//! board.load().await?;
//!
//! for (status, count) in board.column_counts().await {
//!     println!("{}: {count} tasks", status.label());
//! }
//! let todo = board.column(Status::Todo, &BoardFilter::new()).await;
//! println!("first in Todo: {:?}", todo.first().map(|t| &t.title));
//! # Ok(())
//! # }
//! ```

mod archive;
mod board;
mod coordinator;
mod drag;
mod error;
pub mod gateway;
mod store;
mod types;
mod view;

pub use archive::ArchiveBrowser;
pub use board::TaskBoard;
pub use coordinator::{Mutation, MutationHandle, UpdateCoordinator};
pub use drag::{DragController, DropTarget};
pub use error::{BoardError, Result};
pub use gateway::TaskGateway;
pub use store::TaskStore;
pub use view::{column_counts, column_view, normalize_rich_text, BoardFilter};

// Re-export commonly used types
pub use types::{MutationId, Priority, Status, Task, TaskId, TaskPatch, User, UserId};
