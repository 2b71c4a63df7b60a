//! Move types: the (column, index) slots a completed drag gesture reports.

use super::ids::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// A location on the board: column + index within that column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub column: ColumnId,
    pub index: usize,
}

impl Slot {
    /// Create a new slot
    pub fn new(column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column: column.into(),
            index,
        }
    }
}

/// A completed drag gesture: a task's prior and new location.
///
/// A cancelled gesture (dropped outside any column) is represented by
/// passing `None` to the engine rather than by a variant of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub task_id: TaskId,
    pub source: Slot,
    pub destination: Slot,
}

impl MoveRequest {
    /// Create a move request
    pub fn new(task_id: impl Into<TaskId>, source: Slot, destination: Slot) -> Self {
        Self {
            task_id: task_id.into(),
            source,
            destination,
        }
    }

    /// True when the task is dropped back where it started
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }

    /// True when the move stays within one column
    pub fn is_reorder(&self) -> bool {
        self.source.column == self.destination.column
    }
}
