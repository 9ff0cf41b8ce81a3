//! In-memory set of live tasks
//!
//! The store holds every non-archived task on the board. Archived tasks are
//! filtered out on load and removed on archive, so a task present here is by
//! construction visible in exactly one status column.
//!
//! Index arithmetic keeps the per-column total order strict: placing a task
//! closes the gap it leaves behind and opens a slot at the destination, so
//! two live tasks in one column never share an order index.

use crate::error::{BoardError, Result};
use crate::types::{Status, Task, TaskId, UserId};

/// Live task set, written only by the update coordinator and reloads
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Replace the whole live set, dropping any archived records
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks.into_iter().filter(|t| !t.archived).collect();
    }

    /// All live tasks, in storage order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Find a task by ID
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Check whether a task is in the live set
    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Live tasks currently in the given status column, unsorted
    pub fn in_status(&self, status: Status) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// Number of live tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Order index one past the last task in the column (0 when empty)
    pub fn end_index(&self, status: Status) -> i64 {
        self.in_status(status)
            .map(|t| t.order_index)
            .max()
            .map(|max| max + 1)
            .unwrap_or(0)
    }

    /// Move a task to a status column at the given order index.
    ///
    /// The gap left in the origin column is closed and a slot is opened at
    /// the destination, so dragging a card onto another card takes over
    /// that card's position.
    pub fn place(&mut self, id: &TaskId, status: Status, index: i64) -> Result<()> {
        let pos = self
            .tasks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        let old_status = self.tasks[pos].status;
        let old_index = self.tasks[pos].order_index;

        for task in &mut self.tasks {
            if task.status == old_status && task.order_index > old_index {
                task.order_index -= 1;
            }
        }
        for task in &mut self.tasks {
            if &task.id != id && task.status == status && task.order_index >= index {
                task.order_index += 1;
            }
        }

        let task = &mut self.tasks[pos];
        task.status = status;
        task.order_index = index;
        Ok(())
    }

    /// Replace a task's assignee set
    pub fn set_assignees(&mut self, id: &TaskId, assignees: Vec<UserId>) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| BoardError::task_not_found(id.as_str()))?;
        task.assignees = assignees;
        Ok(())
    }

    /// Remove a task from the live set, closing the gap in its column
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| &t.id == id)?;
        let task = self.tasks.remove(pos);
        for t in &mut self.tasks {
            if t.status == task.status && t.order_index > task.order_index {
                t.order_index -= 1;
            }
        }
        Some(task)
    }

    /// Insert a live task, opening a slot at its order index. The task must
    /// not be archived.
    pub fn insert(&mut self, task: Task) {
        for t in &mut self.tasks {
            if t.status == task.status && t.order_index >= task.order_index {
                t.order_index += 1;
            }
        }
        self.tasks.push(task);
    }

    /// Merge an authoritative server record over the local copy. An archived
    /// record removes the task, an unknown ID is added as-is.
    pub fn merge(&mut self, task: Task) {
        if task.archived {
            self.remove(&task.id);
            return;
        }
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn task(id: &str, status: Status, index: i64) -> Task {
        Task::new(format!("Task {id}"))
            .with_id(TaskId::from_string(id))
            .with_status(status)
            .with_order_index(index)
    }

    fn seeded() -> TaskStore {
        let mut store = TaskStore::new();
        store.replace_all(vec![
            task("a", Status::Todo, 0),
            task("b", Status::Todo, 1),
            task("c", Status::Todo, 2),
            task("p", Status::InProgress, 0),
            task("q", Status::InProgress, 1),
        ]);
        store
    }

    fn index_of(store: &TaskStore, id: &str) -> i64 {
        store.get(&TaskId::from_string(id)).unwrap().order_index
    }

    #[test]
    fn test_replace_all_drops_archived() {
        let mut store = TaskStore::new();
        let mut archived = task("x", Status::Done, 0);
        archived.archived = true;
        store.replace_all(vec![task("a", Status::Todo, 0), archived]);
        assert_eq!(store.len(), 1);
        assert!(!store.contains(&TaskId::from_string("x")));
    }

    #[test]
    fn test_end_index() {
        let store = seeded();
        assert_eq!(store.end_index(Status::Todo), 3);
        assert_eq!(store.end_index(Status::InProgress), 2);
        assert_eq!(store.end_index(Status::Done), 0);
    }

    #[test]
    fn test_place_down_within_column() {
        let mut store = seeded();
        // a onto c's slot: a ends after c
        store
            .place(&TaskId::from_string("a"), Status::Todo, 2)
            .unwrap();
        assert_eq!(index_of(&store, "b"), 0);
        assert_eq!(index_of(&store, "c"), 1);
        assert_eq!(index_of(&store, "a"), 2);
    }

    #[test]
    fn test_place_up_within_column() {
        let mut store = seeded();
        // c onto a's slot: c ends before a
        store
            .place(&TaskId::from_string("c"), Status::Todo, 0)
            .unwrap();
        assert_eq!(index_of(&store, "c"), 0);
        assert_eq!(index_of(&store, "a"), 1);
        assert_eq!(index_of(&store, "b"), 2);
    }

    #[test]
    fn test_place_across_columns() {
        let mut store = seeded();
        store
            .place(&TaskId::from_string("a"), Status::InProgress, 1)
            .unwrap();
        // origin column gap closed
        assert_eq!(index_of(&store, "b"), 0);
        assert_eq!(index_of(&store, "c"), 1);
        // destination slot opened
        assert_eq!(index_of(&store, "p"), 0);
        assert_eq!(index_of(&store, "a"), 1);
        assert_eq!(index_of(&store, "q"), 2);
        assert_eq!(
            store.get(&TaskId::from_string("a")).unwrap().status,
            Status::InProgress
        );
    }

    #[test]
    fn test_place_missing_task() {
        let mut store = seeded();
        let err = store
            .place(&TaskId::from_string("nope"), Status::Todo, 0)
            .unwrap_err();
        assert!(matches!(err, BoardError::TaskNotFound { .. }));
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut store = seeded();
        let removed = store.remove(&TaskId::from_string("b")).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(index_of(&store, "a"), 0);
        assert_eq!(index_of(&store, "c"), 1);
        assert!(store.remove(&TaskId::from_string("b")).is_none());
    }

    #[test]
    fn test_insert_opens_slot() {
        let mut store = seeded();
        store.insert(task("n", Status::Todo, 1));
        assert_eq!(index_of(&store, "a"), 0);
        assert_eq!(index_of(&store, "n"), 1);
        assert_eq!(index_of(&store, "b"), 2);
        assert_eq!(index_of(&store, "c"), 3);
    }

    #[test]
    fn test_merge_overwrites_and_adds() {
        let mut store = seeded();
        let server = task("a", Status::Todo, 0).with_priority(Priority::Urgent);
        store.merge(server);
        assert_eq!(
            store.get(&TaskId::from_string("a")).unwrap().priority,
            Priority::Urgent
        );
        assert_eq!(store.len(), 5);

        store.merge(task("new", Status::Done, 0));
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_merge_archived_removes() {
        let mut store = seeded();
        let mut gone = task("b", Status::Todo, 1);
        gone.archived = true;
        store.merge(gone);
        assert!(!store.contains(&TaskId::from_string("b")));
        // gap closed behind it
        assert_eq!(index_of(&store, "c"), 1);
    }
}
