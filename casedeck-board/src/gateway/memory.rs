//! In-memory gateway implementation

use super::TaskGateway;
use crate::error::{BoardError, Result};
use crate::types::{Status, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Gateway operations, for call recording and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOp {
    List,
    Get,
    Create,
    Update,
    UpdateStatus,
    Archive,
    Restore,
    ListArchived,
}

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<Task>,
    calls: Vec<GatewayOp>,
    fail_on: HashSet<GatewayOp>,
}

/// In-memory [`TaskGateway`] holding live and archived records together.
///
/// Behaves like the real backend where the board can observe the
/// difference: order indices are normalized server-side, `updated_at` is
/// bumped on every write, creation always appends at the end of the
/// column. Tests drive it through seeding, the call log and per-operation
/// failure injection.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: Mutex<MemoryState>,
}

impl MemoryGateway {
    /// Create an empty gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway seeded with existing records, archived ones
    /// included
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tasks,
                ..Default::default()
            }),
        }
    }

    /// Make every future call of the given operation fail
    pub fn fail_on(&self, op: GatewayOp) {
        self.lock_state().fail_on.insert(op);
    }

    /// Stop injecting failures
    pub fn clear_failures(&self) {
        self.lock_state().fail_on.clear();
    }

    /// Operations seen so far, in call order. Failed calls are recorded
    /// too.
    pub fn calls(&self) -> Vec<GatewayOp> {
        self.lock_state().calls.clone()
    }

    /// Number of recorded calls of one operation
    pub fn call_count(&self, op: GatewayOp) -> usize {
        self.lock_state().calls.iter().filter(|c| **c == op).count()
    }

    fn lock_state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, op: GatewayOp) -> Result<MutexGuard<'_, MemoryState>> {
        let mut state = self.lock_state();
        state.calls.push(op);
        if state.fail_on.contains(&op) {
            return Err(BoardError::gateway(format!("injected failure: {op:?}")));
        }
        Ok(state)
    }
}

/// Order index one past the last live task in the column, skipping `skip`
fn end_index(tasks: &[Task], status: Status, skip: Option<&TaskId>) -> i64 {
    tasks
        .iter()
        .filter(|t| !t.archived && t.status == status && Some(&t.id) != skip)
        .map(|t| t.order_index + 1)
        .max()
        .unwrap_or(0)
}

#[async_trait]
impl TaskGateway for MemoryGateway {
    async fn list(&self) -> Result<Vec<Task>> {
        let state = self.enter(GatewayOp::List)?;
        Ok(state.tasks.iter().filter(|t| !t.archived).cloned().collect())
    }

    async fn get(&self, id: &TaskId) -> Result<Task> {
        let state = self.enter(GatewayOp::Get)?;
        state
            .tasks
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))
    }

    async fn create(&self, patch: &TaskPatch) -> Result<Task> {
        let mut state = self.enter(GatewayOp::Create)?;
        let status = patch.status.unwrap_or(Status::Backlog);
        let end = end_index(&state.tasks, status, None);

        let mut task = Task::new(patch.title.clone().unwrap_or_default())
            .with_status(status)
            .with_priority(patch.priority.unwrap_or_default())
            .with_order_index(end)
            .with_assignees(patch.assignees.clone().unwrap_or_default());
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }

        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task> {
        let mut state = self.enter(GatewayOp::Update)?;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        patch.apply_to(task);
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn update_status(&self, id: &TaskId, status: Status, index: Option<i64>) -> Result<Task> {
        let mut state = self.enter(GatewayOp::UpdateStatus)?;
        let pos = state
            .tasks
            .iter()
            .position(|t| &t.id == id && !t.archived)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        let old_status = state.tasks[pos].status;
        let old_index = state.tasks[pos].order_index;

        // close the gap in the origin column
        for t in &mut state.tasks {
            if !t.archived && t.status == old_status && t.order_index > old_index {
                t.order_index -= 1;
            }
        }
        // out-of-range requests are clamped, not rejected
        let end = end_index(&state.tasks, status, Some(id));
        let target = index.unwrap_or(end).clamp(0, end);
        for t in &mut state.tasks {
            if &t.id != id && !t.archived && t.status == status && t.order_index >= target {
                t.order_index += 1;
            }
        }

        let task = &mut state.tasks[pos];
        task.status = status;
        task.order_index = target;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn archive(&self, id: &TaskId) -> Result<()> {
        let mut state = self.enter(GatewayOp::Archive)?;
        let pos = state
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        if state.tasks[pos].archived {
            return Ok(());
        }
        let status = state.tasks[pos].status;
        let index = state.tasks[pos].order_index;
        state.tasks[pos].archived = true;
        state.tasks[pos].updated_at = Utc::now();
        for t in &mut state.tasks {
            if !t.archived && t.status == status && t.order_index > index {
                t.order_index -= 1;
            }
        }
        Ok(())
    }

    async fn restore(&self, id: &TaskId) -> Result<()> {
        let mut state = self.enter(GatewayOp::Restore)?;
        let pos = state
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        if !state.tasks[pos].archived {
            return Ok(());
        }
        let end = end_index(&state.tasks, state.tasks[pos].status, None);
        let task = &mut state.tasks[pos];
        task.archived = false;
        task.order_index = end;
        task.updated_at = Utc::now();
        Ok(())
    }

    async fn list_archived(&self, search: Option<&str>) -> Result<Vec<Task>> {
        let state = self.enter(GatewayOp::ListArchived)?;
        let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.archived)
            .filter(|t| needle.is_empty() || t.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
