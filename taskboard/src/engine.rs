//! BoardEngine - applies completed drag gestures to the board.
//!
//! The engine owns the task store, the column set and the status table.
//! `apply_move` validates a move against the current board, commits the new
//! column contents in one step and tells the caller whether the backend
//! needs a status update. It never performs I/O itself.

use crate::columns::ColumnSet;
use crate::error::{BoardError, Result};
use crate::load::{load_board, LoadReport};
use crate::status::StatusMap;
use crate::store::TaskStore;
use crate::sync::StatusUpdate;
use crate::types::{ColumnId, ColumnSpec, MoveRequest, Slot, Task, TaskId};
use serde::Serialize;
use tracing::debug;

/// Result of applying a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The gesture ended outside any drop target
    Cancelled,
    /// The task was dropped where it started
    NoChange,
    /// The board changed
    Moved {
        task_id: TaskId,
        from: Slot,
        to: Slot,
        /// Present only when the task changed column
        sync: Option<StatusUpdate>,
    },
}

impl MoveOutcome {
    /// True if the board changed
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    /// Status update the move requires, if any
    pub fn sync_update(&self) -> Option<&StatusUpdate> {
        match self {
            Self::Moved { sync, .. } => sync.as_ref(),
            _ => None,
        }
    }
}

/// Single owner of board state
#[derive(Debug, Clone)]
pub struct BoardEngine {
    store: TaskStore,
    columns: ColumnSet,
    statuses: StatusMap,
}

impl BoardEngine {
    /// Create an empty board with the given column order
    pub fn new(specs: &[ColumnSpec]) -> Result<Self> {
        let columns = ColumnSet::new(specs)?;
        let statuses = StatusMap::new(columns.order())?;
        Ok(Self {
            store: TaskStore::new(),
            columns,
            statuses,
        })
    }

    /// Replace all tasks with a freshly fetched list
    pub fn load(&mut self, tasks: Vec<Task>) -> Result<LoadReport> {
        let (store, columns, report) = load_board(tasks, &self.columns, &self.statuses)?;
        self.store = store;
        self.columns = columns;
        Ok(report)
    }

    /// The task store
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The columns
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// The column ⇄ status table
    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    /// Status string implied by the task's current column
    pub fn task_status(&self, task_id: &TaskId) -> Result<&str> {
        let (column, _) = self.columns.locate(task_id)?;
        self.statuses
            .status_of(&column)
            .ok_or_else(|| BoardError::unknown_column(column.as_str()))
    }

    /// Apply a completed drag gesture. `None` is a cancelled gesture.
    ///
    /// Rejections leave the board untouched.
    pub fn apply_move(&mut self, mv: Option<&MoveRequest>) -> Result<MoveOutcome> {
        let Some(mv) = mv else {
            debug!("move cancelled");
            return Ok(MoveOutcome::Cancelled);
        };
        if mv.is_noop() {
            debug!(task = %mv.task_id, "move dropped in place");
            return Ok(MoveOutcome::NoChange);
        }

        self.validate(mv)?;

        let mut next = self.columns.clone();
        next.splice(&mv.source.column, mv.source.index, 1, None)?;
        next.splice(
            &mv.destination.column,
            mv.destination.index,
            0,
            Some(mv.task_id.clone()),
        )?;
        self.columns = next;

        let sync = if mv.is_reorder() {
            None
        } else {
            Some(self.status_update(&mv.task_id, &mv.destination.column)?)
        };

        debug!(
            task = %mv.task_id,
            from = %mv.source.column,
            to = %mv.destination.column,
            index = mv.destination.index,
            sync = sync.is_some(),
            "task moved"
        );

        Ok(MoveOutcome::Moved {
            task_id: mv.task_id.clone(),
            from: mv.source.clone(),
            to: mv.destination.clone(),
            sync,
        })
    }

    fn validate(&self, mv: &MoveRequest) -> Result<()> {
        let source = self
            .columns
            .column(&mv.source.column)
            .ok_or_else(|| BoardError::unknown_column(mv.source.column.as_str()))?;
        let destination = self
            .columns
            .column(&mv.destination.column)
            .ok_or_else(|| BoardError::unknown_column(mv.destination.column.as_str()))?;

        if !self.store.contains(&mv.task_id) {
            return Err(BoardError::task_not_found(mv.task_id.as_str()));
        }

        match source.task_ids.get(mv.source.index) {
            None => {
                return Err(BoardError::IndexOutOfRange {
                    column: source.id.to_string(),
                    index: mv.source.index,
                    len: source.len(),
                })
            }
            Some(id) if id != &mv.task_id => {
                return Err(BoardError::SourceMismatch {
                    id: mv.task_id.to_string(),
                    column: source.id.to_string(),
                    index: mv.source.index,
                })
            }
            Some(_) => {}
        }

        // Insert position is counted after the task leaves its source column
        let insert_limit = if mv.is_reorder() {
            destination.len() - 1
        } else {
            destination.len()
        };
        if mv.destination.index > insert_limit {
            return Err(BoardError::IndexOutOfRange {
                column: destination.id.to_string(),
                index: mv.destination.index,
                len: destination.len(),
            });
        }

        Ok(())
    }

    fn status_update(&self, task_id: &TaskId, column: &ColumnId) -> Result<StatusUpdate> {
        let task = self
            .store
            .get(task_id)
            .ok_or_else(|| BoardError::task_not_found(task_id.as_str()))?;
        let status = self
            .statuses
            .status_of(column)
            .ok_or_else(|| BoardError::unknown_column(column.as_str()))?;
        Ok(StatusUpdate {
            id: task_id.clone(),
            owner_id: task.owner_id.clone(),
            status: status.to_string(),
        })
    }

    /// Move a task to the end of `column` outside of a gesture. Returns false
    /// if it is already there. Used to revert an unacknowledged move.
    pub(crate) fn relocate_to_end(&mut self, task_id: &TaskId, column: &ColumnId) -> Result<bool> {
        let (current, index) = self.columns.locate(task_id)?;
        if &current == column {
            return Ok(false);
        }
        let len = self
            .columns
            .column(column)
            .map(|c| c.len())
            .ok_or_else(|| BoardError::unknown_column(column.as_str()))?;

        let mut next = self.columns.clone();
        next.splice(&current, index, 1, None)?;
        next.splice(column, len, 0, Some(task_id.clone()))?;
        self.columns = next;
        Ok(true)
    }
}
