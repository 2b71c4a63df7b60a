//! Sprint type: a time-boxed lens over a subset of tasks

use super::ids::{OwnerId, SprintId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A sprint groups tasks without owning them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: SprintId,
    pub name: String,
    #[serde(default)]
    pub goal: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub owner_id: OwnerId,
    pub task_ids: HashSet<TaskId>,
}

impl Sprint {
    /// True if the sprint includes the task
    pub fn contains(&self, id: &TaskId) -> bool {
        self.task_ids.contains(id)
    }

    /// True if `at` falls within the sprint's time box (inclusive)
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at <= self.end_date
    }
}
