//! Board facade
//!
//! `TaskBoard` wires store, coordinator, drag controller and gateway
//! together the way an embedding UI consumes them. Renderers read through
//! `store()` or the snapshot helpers; every write goes through the
//! coordinator.

use crate::archive::ArchiveBrowser;
use crate::coordinator::{Mutation, MutationHandle, UpdateCoordinator};
use crate::drag::{DragController, DropTarget};
use crate::error::Result;
use crate::gateway::TaskGateway;
use crate::store::TaskStore;
use crate::types::{Status, Task, TaskId, User};
use crate::view::{self, BoardFilter};
use casedeck_dnd::{Point, Region};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

/// The assembled task board
pub struct TaskBoard {
    store: Arc<RwLock<TaskStore>>,
    gateway: Arc<dyn TaskGateway>,
    coordinator: UpdateCoordinator,
    drag: DragController,
    users: Vec<User>,
}

impl TaskBoard {
    /// Create a board over the given gateway. Call [`load`](Self::load)
    /// before rendering.
    pub fn new(gateway: Arc<dyn TaskGateway>) -> Self {
        let store = Arc::new(RwLock::new(TaskStore::new()));
        let coordinator = UpdateCoordinator::new(store.clone(), gateway.clone());
        Self {
            store,
            gateway,
            coordinator,
            drag: DragController::new(),
            users: Vec::new(),
        }
    }

    /// Attach the assignable-user directory
    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    /// Fetch the live task list from the gateway into the store
    pub async fn load(&self) -> Result<()> {
        self.coordinator.reload().await
    }

    /// Read access to the live task set
    pub async fn store(&self) -> RwLockReadGuard<'_, TaskStore> {
        self.store.read().await
    }

    /// Snapshot of one column, filtered and in display order
    pub async fn column(&self, status: Status, filter: &BoardFilter) -> Vec<Task> {
        let store = self.store.read().await;
        view::column_view(&store, status, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Per-column task counts for the header badges
    pub async fn column_counts(&self) -> [(Status, usize); 6] {
        let store = self.store.read().await;
        view::column_counts(&store)
    }

    /// Apply a mutation directly, outside any drag session
    pub async fn apply(&self, mutation: Mutation) -> Result<MutationHandle> {
        self.coordinator.apply(mutation).await
    }

    /// Begin dragging a card
    pub async fn start_drag(&mut self, id: &TaskId) -> Result<()> {
        let store = self.store.read().await;
        self.drag.start(&store, id)
    }

    /// Update the drop candidate from the pointer position
    pub fn drag_over(
        &mut self,
        pointer: Point,
        regions: &[Region<DropTarget>],
    ) -> Option<DropTarget> {
        self.drag.hover(pointer, regions).cloned()
    }

    /// Drop the card: decide the mutation and dispatch it. `Ok(None)`
    /// means the drop required no change.
    pub async fn end_drag(&mut self) -> Result<Option<MutationHandle>> {
        let mutation = {
            let store = self.store.read().await;
            self.drag.finish(&store)
        };
        match mutation {
            Some(mutation) => Ok(Some(self.coordinator.apply(mutation).await?)),
            None => Ok(None),
        }
    }

    /// Abandon the drag session
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Whether a drag session is active
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// A fresh archive browser sharing this board's gateway and
    /// coordinator
    pub fn archive_browser(&self) -> ArchiveBrowser {
        ArchiveBrowser::new(self.coordinator.clone(), self.gateway.clone())
    }

    /// The assignable-user directory
    pub fn users(&self) -> &[User] {
        &self.users
    }
}
