//! Column types: Column, ColumnSpec

use super::ids::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// Declaration of a column in the fixed column order (id + display title)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: String,
    pub title: String,
}

impl ColumnSpec {
    /// Create a new column declaration
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A column defines a workflow stage and holds its tasks in display order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub task_ids: Vec<TaskId>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Number of tasks in the column
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// True if the column holds no tasks
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Position of a task in this column
    pub fn position_of(&self, id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|t| t == id)
    }
}
