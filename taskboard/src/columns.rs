//! ColumnSet - the fixed, ordered columns of a board and their task order

use crate::error::{BoardError, Result};
use crate::store::TaskStore;
use crate::types::{Column, ColumnId, ColumnSpec, TaskId};
use std::collections::{HashMap, HashSet};

/// Columns in fixed display order. Only each column's `task_ids` mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: HashMap<ColumnId, Column>,
    order: Vec<ColumnId>,
}

impl ColumnSet {
    /// Build an empty column set from ordered declarations
    pub fn new(specs: &[ColumnSpec]) -> Result<Self> {
        let mut columns = HashMap::with_capacity(specs.len());
        let mut order = Vec::with_capacity(specs.len());

        for spec in specs {
            let id = ColumnId::parse(&spec.id)?;
            if columns.contains_key(&id) {
                return Err(BoardError::DuplicateColumn { id: spec.id.clone() });
            }
            order.push(id.clone());
            columns.insert(id.clone(), Column::new(id, spec.title.clone()));
        }

        Ok(Self { columns, order })
    }

    /// Column ids in display order
    pub fn order(&self) -> &[ColumnId] {
        &self.order
    }

    /// Look up a column
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    /// True if the column is part of the board
    pub fn contains(&self, id: &ColumnId) -> bool {
        self.columns.contains_key(id)
    }

    /// Iterate columns in display order
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.order.iter().filter_map(|id| self.columns.get(id))
    }

    /// Total number of task ids across all columns
    pub fn task_count(&self) -> usize {
        self.columns.values().map(Column::len).sum()
    }

    /// Find the column and index currently holding a task
    pub fn locate(&self, task_id: &TaskId) -> Result<(ColumnId, usize)> {
        self.iter()
            .find_map(|col| col.position_of(task_id).map(|i| (col.id.clone(), i)))
            .ok_or_else(|| BoardError::task_not_found(task_id.as_str()))
    }

    /// Array splice on one column's task ids: remove `remove_count` ids at
    /// `index`, then insert `insert` there. Returns the removed ids.
    pub(crate) fn splice(
        &mut self,
        column: &ColumnId,
        index: usize,
        remove_count: usize,
        insert: Option<TaskId>,
    ) -> Result<Vec<TaskId>> {
        let col = self
            .columns
            .get_mut(column)
            .ok_or_else(|| BoardError::unknown_column(column.as_str()))?;

        let end = index.saturating_add(remove_count);
        if end > col.task_ids.len() {
            return Err(BoardError::IndexOutOfRange {
                column: column.to_string(),
                index,
                len: col.task_ids.len(),
            });
        }

        Ok(col.task_ids.splice(index..end, insert).collect())
    }

    /// Verify that columns partition the tasks they reference and that every
    /// referenced task exists in the store.
    pub fn check_partition(&self, store: &TaskStore) -> Result<()> {
        let mut seen = HashSet::new();
        for col in self.iter() {
            for id in &col.task_ids {
                if !store.contains(id) {
                    return Err(BoardError::partition(format!(
                        "column '{}' references unknown task '{}'",
                        col.id, id
                    )));
                }
                if !seen.insert(id) {
                    return Err(BoardError::partition(format!(
                        "task '{}' appears more than once (again in '{}')",
                        id, col.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Append a task to the end of a column during load
    pub(crate) fn push(&mut self, column: &ColumnId, task_id: TaskId) -> Result<()> {
        let col = self
            .columns
            .get_mut(column)
            .ok_or_else(|| BoardError::unknown_column(column.as_str()))?;
        col.task_ids.push(task_id);
        Ok(())
    }

    /// Same columns, all emptied
    pub(crate) fn emptied(&self) -> Self {
        let mut empty = self.clone();
        for col in empty.columns.values_mut() {
            col.task_ids.clear();
        }
        empty
    }
}
