//! Drag session state machine
//!
//! One controller instance tracks at most one drag at a time: `Idle` until
//! `start`, `Dragging` while the pointer moves, back to `Idle` on `finish`
//! or `cancel`. Hover resolution delegates to `casedeck-dnd`; the decision
//! of what a drop means is made here, against the store, at finish time.

use crate::coordinator::Mutation;
use crate::error::{BoardError, Result};
use crate::store::TaskStore;
use crate::types::{Status, TaskId};
use casedeck_dnd::{resolve, Point, Region};

/// Resolved drop target under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A status column (its empty area or header)
    Column(Status),
    /// Another card
    Card(TaskId),
    /// The archive drop zone
    Archive,
}

#[derive(Debug, Clone)]
struct DragSession {
    task_id: TaskId,
    origin_status: Status,
    origin_index: i64,
    candidate: Option<DropTarget>,
}

/// Tracks the active drag session and turns a drop into a [`Mutation`]
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag session is active
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// ID of the task being dragged, if any
    pub fn dragged_task(&self) -> Option<&TaskId> {
        self.session.as_ref().map(|s| &s.task_id)
    }

    /// Drop target currently under the pointer, if any
    pub fn candidate(&self) -> Option<&DropTarget> {
        self.session.as_ref().and_then(|s| s.candidate.as_ref())
    }

    /// Begin dragging a task. Fails when a session is already active or
    /// the task is not in the live store.
    pub fn start(&mut self, store: &TaskStore, id: &TaskId) -> Result<()> {
        if self.session.is_some() {
            return Err(BoardError::DragSessionActive);
        }
        let task = store
            .get(id)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        tracing::debug!(task = %task.id, origin = %task.status, "drag session started");
        self.session = Some(DragSession {
            task_id: task.id.clone(),
            origin_status: task.status,
            origin_index: task.order_index,
            candidate: None,
        });
        Ok(())
    }

    /// Update the drop candidate from the pointer position. Returns the
    /// new candidate for highlight rendering. No-op while idle.
    pub fn hover(
        &mut self,
        pointer: Point,
        regions: &[Region<DropTarget>],
    ) -> Option<&DropTarget> {
        let session = self.session.as_mut()?;
        session.candidate = resolve(pointer, regions).cloned();
        session.candidate.as_ref()
    }

    /// End the session and decide what the drop means. Always returns to
    /// idle. `None` means nothing to persist: no candidate, a drop on the
    /// card itself or its own column, or a dragged task or target that has
    /// left the store since the last hover. Card drops are judged against
    /// the dragged task's current placement, which may differ from the one
    /// captured at `start` when another mutation settled mid-drag.
    pub fn finish(&mut self, store: &TaskStore) -> Option<Mutation> {
        let session = self.session.take()?;
        tracing::debug!(
            task = %session.task_id,
            origin = %session.origin_status,
            origin_index = session.origin_index,
            candidate = ?session.candidate,
            "drag session finished"
        );
        let candidate = session.candidate?;
        let dragged = store.get(&session.task_id)?;
        match candidate {
            DropTarget::Archive => Some(Mutation::Archive {
                id: session.task_id,
            }),
            DropTarget::Column(status) if status == session.origin_status => None,
            DropTarget::Column(status) => Some(Mutation::SetStatus {
                id: session.task_id,
                status,
                index: store.end_index(status),
            }),
            DropTarget::Card(target_id) => {
                if target_id == session.task_id {
                    return None;
                }
                let target = store.get(&target_id)?;
                if target.status == dragged.status {
                    if target.order_index == dragged.order_index {
                        return None;
                    }
                    Some(Mutation::Reorder {
                        id: session.task_id,
                        index: target.order_index,
                    })
                } else {
                    Some(Mutation::SetStatus {
                        id: session.task_id,
                        status: target.status,
                        index: target.order_index,
                    })
                }
            }
        }
    }

    /// Abandon the session without producing a mutation
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(task = %session.task_id, "drag session cancelled");
        }
    }
}
