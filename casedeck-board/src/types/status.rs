//! Workflow status and board column order

use serde::{Deserialize, Serialize};

/// Workflow stage of a task. Each status is one column on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Backlog,
    OnHold,
    Todo,
    InProgress,
    Test,
    Done,
}

impl Status {
    /// All statuses in board column order, left to right
    pub fn all() -> [Status; 6] {
        [
            Status::Backlog,
            Status::OnHold,
            Status::Todo,
            Status::InProgress,
            Status::Test,
            Status::Done,
        ]
    }

    /// Wire token, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Backlog => "BACKLOG",
            Status::OnHold => "ON_HOLD",
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Test => "TEST",
            Status::Done => "DONE",
        }
    }

    /// Human-readable column heading
    pub fn label(&self) -> &'static str {
        match self {
            Status::Backlog => "Backlog",
            Status::OnHold => "On Hold",
            Status::Todo => "Todo",
            Status::InProgress => "In Progress",
            Status::Test => "Test",
            Status::Done => "Done",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = crate::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BACKLOG" => Ok(Status::Backlog),
            "ON_HOLD" => Ok(Status::OnHold),
            "TODO" => Ok(Status::Todo),
            "IN_PROGRESS" => Ok(Status::InProgress),
            "TEST" => Ok(Status::Test),
            "DONE" => Ok(Status::Done),
            other => Err(crate::BoardError::parse(format!(
                "unrecognized status: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
