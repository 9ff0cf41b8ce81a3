//! Typed identifiers for board entities
//!
//! Task and user IDs come from the server and are opaque strings. Mutation IDs
//! are minted locally as ULIDs so every optimistic update can be traced
//! through the logs.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifier of a task record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Mint a fresh ULID-backed ID. Only local creation paths use this;
    /// server-backed tasks keep whatever ID the server assigned.
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wrap an existing server-assigned ID
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a user account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an existing server-assigned ID
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one optimistic mutation, minted locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutationId(Ulid);

impl MutationId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl std::fmt::Display for MutationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for MutationId {
    fn default() -> Self {
        Self::new()
    }
}
