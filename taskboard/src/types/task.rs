//! Task types: Task, Priority

use super::ids::{OwnerId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority as displayed on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Unclassified,
}

impl Priority {
    /// Map the backend's integer code. Anything outside 1..=3 is unclassified.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Low,
            2 => Self::Medium,
            3 => Self::High,
            _ => Self::Unclassified,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task/card on the board.
///
/// Snapshot of the remote record for one load cycle. The engine never edits
/// these fields; `status` is the value the backend reported at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub owner_id: OwnerId,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

impl Task {
    /// Create a new task with the given id, title and owner
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, owner: impl Into<OwnerId>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            owner_id: owner.into(),
            priority: Priority::Unclassified,
            created_at: Utc::now(),
            status: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the loaded status string
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
