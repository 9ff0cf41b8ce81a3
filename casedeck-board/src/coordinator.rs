//! Optimistic update coordination
//!
//! Every change follows the same shape: write the store first so the UI
//! reflects it immediately, then persist through the gateway in a detached
//! task. A successful call merges the authoritative record back; any
//! failure rolls the whole board back by reloading from the gateway. There
//! are no retries and no partial rollbacks.

use crate::error::{BoardError, Result};
use crate::gateway::TaskGateway;
use crate::store::TaskStore;
use crate::types::{MutationId, Status, Task, TaskId, TaskPatch, UserId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// A change to persist, produced by the drag controller or issued directly
#[derive(Debug, Clone)]
pub enum Mutation {
    /// Move a task to a status column at the given index
    SetStatus {
        id: TaskId,
        status: Status,
        index: i64,
    },
    /// Move a task within its current column
    Reorder { id: TaskId, index: i64 },
    /// Replace a task's assignee set
    SetAssignees {
        id: TaskId,
        assignees: Vec<UserId>,
    },
    /// Soft-delete a task
    Archive { id: TaskId },
    /// Bring an archived record back to its status column
    Restore { task: Task },
}

/// Gateway call derived from a mutation while the store lock is held
#[derive(Debug)]
enum GatewayCall {
    UpdateStatus {
        id: TaskId,
        status: Status,
        index: i64,
    },
    Update {
        id: TaskId,
        patch: TaskPatch,
    },
    Archive {
        id: TaskId,
    },
    Restore {
        id: TaskId,
    },
}

/// What a successful gateway call settles into
#[derive(Debug)]
enum Settle {
    /// Merge the returned record over the local copy
    Merge(Task),
    /// Reload the whole board
    Reload,
    /// Nothing further
    Done,
}

/// Handle to one in-flight mutation. Dropping it never cancels the
/// reconciliation; `settled` exists so tests and embedders can await it.
#[derive(Debug)]
pub struct MutationHandle {
    id: MutationId,
    reconcile: JoinHandle<()>,
}

impl MutationHandle {
    /// ID correlating this mutation in the logs
    pub fn id(&self) -> MutationId {
        self.id
    }

    /// Wait until the gateway call and any follow-up reload finished
    pub async fn settled(self) {
        let _ = self.reconcile.await;
    }
}

/// Owns the write path to the task store and reconciles every mutation
/// against the gateway
#[derive(Clone)]
pub struct UpdateCoordinator {
    store: Arc<RwLock<TaskStore>>,
    gateway: Arc<dyn TaskGateway>,
}

impl UpdateCoordinator {
    pub fn new(store: Arc<RwLock<TaskStore>>, gateway: Arc<dyn TaskGateway>) -> Self {
        Self { store, gateway }
    }

    /// Replace the store contents with the gateway's live task list. Serves
    /// both the initial load and rollback after a failed mutation.
    pub async fn reload(&self) -> Result<()> {
        let tasks = self.gateway.list().await?;
        tracing::info!(count = tasks.len(), "board reloaded");
        let mut store = self.store.write().await;
        store.replace_all(tasks);
        Ok(())
    }

    /// Apply a mutation optimistically and spawn its reconciliation.
    ///
    /// The store is updated before this returns; the gateway call runs
    /// detached. An error here means the mutation was rejected locally and
    /// nothing was written or sent.
    pub async fn apply(&self, mutation: Mutation) -> Result<MutationHandle> {
        let mutation_id = MutationId::new();
        let call = {
            let mut store = self.store.write().await;
            match mutation {
                Mutation::SetStatus { id, status, index } => {
                    store.place(&id, status, index)?;
                    GatewayCall::UpdateStatus { id, status, index }
                }
                Mutation::Reorder { id, index } => {
                    let status = store
                        .get(&id)
                        .map(|t| t.status)
                        .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
                    store.place(&id, status, index)?;
                    GatewayCall::UpdateStatus { id, status, index }
                }
                Mutation::SetAssignees { id, assignees } => {
                    store.set_assignees(&id, assignees.clone())?;
                    GatewayCall::Update {
                        id,
                        patch: TaskPatch::new().with_assignees(assignees),
                    }
                }
                Mutation::Archive { id } => {
                    store
                        .remove(&id)
                        .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
                    GatewayCall::Archive { id }
                }
                Mutation::Restore { task } => {
                    let id = task.id.clone();
                    let mut live = task;
                    live.archived = false;
                    store.insert(live);
                    GatewayCall::Restore { id }
                }
            }
        };

        tracing::debug!(%mutation_id, ?call, "mutation applied, persisting");
        let this = self.clone();
        let reconcile = tokio::spawn(async move {
            this.reconcile(mutation_id, call).await;
        });
        Ok(MutationHandle {
            id: mutation_id,
            reconcile,
        })
    }

    async fn reconcile(&self, mutation_id: MutationId, call: GatewayCall) {
        let result = match call {
            GatewayCall::UpdateStatus { id, status, index } => self
                .gateway
                .update_status(&id, status, Some(index))
                .await
                .map(Settle::Merge),
            GatewayCall::Update { id, patch } => {
                self.gateway.update(&id, &patch).await.map(Settle::Merge)
            }
            GatewayCall::Archive { id } => self.gateway.archive(&id).await.map(|_| Settle::Done),
            GatewayCall::Restore { id } => self.gateway.restore(&id).await.map(|_| Settle::Reload),
        };

        match result {
            Ok(Settle::Merge(task)) => {
                let mut store = self.store.write().await;
                store.merge(task);
            }
            Ok(Settle::Done) => {}
            Ok(Settle::Reload) => {
                if let Err(reload_err) = self.reload().await {
                    tracing::error!(%mutation_id, %reload_err, "board reload after restore failed");
                }
            }
            Err(err) => {
                tracing::warn!(%mutation_id, %err, "persistence failed, reloading board");
                if let Err(reload_err) = self.reload().await {
                    tracing::error!(
                        %mutation_id,
                        %reload_err,
                        "board reload failed, keeping optimistic state"
                    );
                }
            }
        }
    }
}
