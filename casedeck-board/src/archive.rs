//! Archive browsing and restore
//!
//! The archive listing is fetched on demand and lives beside the board, not
//! in the task store. Restoring routes through the coordinator like every
//! other mutation; archiving itself only ever happens via drag-to-archive.

use crate::coordinator::{Mutation, MutationHandle, UpdateCoordinator};
use crate::error::{BoardError, Result};
use crate::gateway::TaskGateway;
use crate::types::{Task, TaskId};
use std::sync::Arc;

/// On-demand view of archived tasks with optimistic restore
pub struct ArchiveBrowser {
    coordinator: UpdateCoordinator,
    gateway: Arc<dyn TaskGateway>,
    entries: Vec<Task>,
}

impl ArchiveBrowser {
    pub fn new(coordinator: UpdateCoordinator, gateway: Arc<dyn TaskGateway>) -> Self {
        Self {
            coordinator,
            gateway,
            entries: Vec::new(),
        }
    }

    /// Fetch the archived tasks, optionally filtered by a case-insensitive
    /// title substring, and keep them as the current listing
    pub async fn refresh(&mut self, search: Option<&str>) -> Result<&[Task]> {
        self.entries = self.gateway.list_archived(search).await?;
        Ok(&self.entries)
    }

    /// The listing from the last refresh, minus optimistically restored
    /// entries
    pub fn entries(&self) -> &[Task] {
        &self.entries
    }

    /// Restore an archived task to its prior status column.
    ///
    /// The entry leaves the listing immediately; the task reappears on the
    /// board through the coordinator. Refresh after settlement for the
    /// authoritative listing.
    pub async fn restore(&mut self, id: &TaskId) -> Result<MutationHandle> {
        let pos = self
            .entries
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        let task = self.entries.remove(pos);
        self.coordinator.apply(Mutation::Restore { task }).await
    }
}
