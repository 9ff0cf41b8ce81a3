//! Task record and the partial used for updates

use super::ids::{TaskId, UserId};
use super::priority::Priority;
use super::status::Status;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task card on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    /// Rich-content body. Opaque to the board core, only normalized for
    /// the plain-text column preview.
    #[serde(default)]
    pub description: String,

    pub status: Status,

    #[serde(default)]
    pub priority: Priority,

    /// Position within the status column, ascending
    pub order_index: i64,

    /// Users assigned to this task
    #[serde(default)]
    pub assignees: Vec<UserId>,

    /// Soft-delete flag. Archived tasks never appear in a status column.
    #[serde(default)]
    pub archived: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Number of comments on the task. Display-only, maintained by the
    /// server.
    #[serde(default)]
    pub comment_count: u32,
}

impl Task {
    /// Create a new task with the given title. New tasks start unarchived
    /// in the backlog with medium priority.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            status: Status::Backlog,
            priority: Priority::Medium,
            order_index: 0,
            assignees: Vec::new(),
            archived: false,
            created_at: now,
            updated_at: now,
            comment_count: 0,
        }
    }

    /// Set the ID
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the order index
    pub fn with_order_index(mut self, order_index: i64) -> Self {
        self.order_index = order_index;
        self
    }

    /// Set the assignees
    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = assignees;
        self
    }

    /// Check whether a user is assigned to this task
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assignees.contains(user)
    }
}

/// Partial task used for create and update calls. Absent fields are left
/// untouched by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<UserId>>,
}

impl TaskPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the order index
    pub fn with_order_index(mut self, order_index: i64) -> Self {
        self.order_index = Some(order_index);
        self
    }

    /// Set the assignees
    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = Some(assignees);
        self
    }

    /// Check whether the patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.order_index.is_none()
            && self.assignees.is_none()
    }

    /// Apply this patch to a task in place
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(order_index) = self.order_index {
            task.order_index = order_index;
        }
        if let Some(assignees) = &self.assignees {
            task.assignees = assignees.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Review filing");
        assert_eq!(task.title, "Review filing");
        assert_eq!(task.status, Status::Backlog);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.archived);
        assert!(task.assignees.is_empty());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let task = Task::new("Test").with_order_index(3);
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("orderIndex").is_some());
        assert!(json.get("commentCount").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("order_index").is_none());
    }

    #[test]
    fn test_task_round_trip() {
        let task = Task::new("Test")
            .with_status(Status::InProgress)
            .with_priority(Priority::High)
            .with_assignees(vec![UserId::from_string("u1")]);
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, task.id);
        assert_eq!(parsed.status, Status::InProgress);
        assert_eq!(parsed.priority, Priority::High);
        assert!(parsed.is_assigned_to(&UserId::from_string("u1")));
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = TaskPatch::new()
            .with_status(Status::Done)
            .with_order_index(5);
        let json = serde_json::to_string(&patch).unwrap();
        assert!(json.contains("\"status\":\"DONE\""));
        assert!(json.contains("\"orderIndex\":5"));
        assert!(!json.contains("title"));
        assert!(!json.contains("assignees"));
    }

    #[test]
    fn test_patch_apply() {
        let mut task = Task::new("Before");
        let before_created = task.created_at;
        TaskPatch::new()
            .with_title("After")
            .with_status(Status::Test)
            .apply_to(&mut task);
        assert_eq!(task.title, "After");
        assert_eq!(task.status, Status::Test);
        assert_eq!(task.created_at, before_created);
    }

    #[test]
    fn test_empty_patch() {
        assert!(TaskPatch::new().is_empty());
        assert!(!TaskPatch::new().with_title("x").is_empty());
    }
}
