//! Initial load: place fetched tasks into columns by their status string.

use crate::columns::ColumnSet;
use crate::error::Result;
use crate::status::StatusMap;
use crate::store::TaskStore;
use crate::types::{Task, TaskId};
use serde::Serialize;
use tracing::{info, warn};

/// A fetched task whose status names no column on this board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedStatus {
    pub task_id: TaskId,
    pub status: String,
}

/// Conditions recorded while loading a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Tasks kept in the store but shown in no column
    pub unmatched: Vec<UnmatchedStatus>,
    /// Ids fetched more than once; only the first record is kept
    pub duplicates: Vec<TaskId>,
}

impl LoadReport {
    /// True if nothing noteworthy happened
    pub fn is_clean(&self) -> bool {
        self.unmatched.is_empty() && self.duplicates.is_empty()
    }
}

/// Partition fetched tasks into a fresh copy of `layout`, preserving fetch
/// order within each column.
pub fn load_board(
    tasks: Vec<Task>,
    layout: &ColumnSet,
    statuses: &StatusMap,
) -> Result<(TaskStore, ColumnSet, LoadReport)> {
    let mut store = TaskStore::new();
    let mut columns = layout.emptied();
    let mut report = LoadReport::default();

    for task in tasks {
        let id = task.id.clone();
        let column = statuses.column_of(&task.status).cloned();
        let status = task.status.clone();

        if !store.insert(task) {
            warn!(task = %id, "duplicate task in load, keeping first");
            report.duplicates.push(id);
            continue;
        }

        match column {
            Some(column) => columns.push(&column, id)?,
            None => {
                warn!(task = %id, %status, "status matches no column");
                report.unmatched.push(UnmatchedStatus {
                    task_id: id,
                    status,
                });
            }
        }
    }

    info!(
        tasks = store.len(),
        placed = columns.task_count(),
        unmatched = report.unmatched.len(),
        "board loaded"
    );
    Ok((store, columns, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_columns;
    use crate::types::ColumnId;

    fn layout() -> (ColumnSet, StatusMap) {
        let columns = ColumnSet::new(&default_columns()).unwrap();
        let statuses = StatusMap::new(columns.order()).unwrap();
        (columns, statuses)
    }

    fn ids(columns: &ColumnSet, column: &str) -> Vec<String> {
        columns
            .column(&ColumnId::from(column))
            .unwrap()
            .task_ids
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_tasks_land_in_status_columns_in_fetch_order() {
        let (layout, statuses) = layout();
        let tasks = vec![
            Task::new("a", "A", "o").with_status("todo"),
            Task::new("b", "B", "o").with_status("In Progress"),
            Task::new("c", "C", "o").with_status("todo"),
            Task::new("d", "D", "o").with_status("ready for staging"),
        ];
        let (store, columns, report) = load_board(tasks, &layout, &statuses).unwrap();

        assert!(report.is_clean());
        assert_eq!(store.len(), 4);
        assert_eq!(ids(&columns, "todo"), vec!["a", "c"]);
        assert_eq!(ids(&columns, "in-progress"), vec!["b"]);
        assert_eq!(ids(&columns, "ready-for-staging"), vec!["d"]);
        columns.check_partition(&store).unwrap();
    }

    #[test]
    fn test_unmatched_status_is_stored_but_not_placed() {
        let (layout, statuses) = layout();
        let tasks = vec![
            Task::new("a", "A", "o").with_status("todo"),
            Task::new("r", "R", "o").with_status("reviewed"),
        ];
        let (store, columns, report) = load_board(tasks, &layout, &statuses).unwrap();

        assert!(store.contains(&TaskId::from("r")));
        assert!(columns.locate(&TaskId::from("r")).is_err());
        assert_eq!(columns.task_count(), 1);
        assert_eq!(
            report.unmatched,
            vec![UnmatchedStatus {
                task_id: TaskId::from("r"),
                status: "reviewed".into()
            }]
        );
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let (layout, statuses) = layout();
        let tasks = vec![
            Task::new("a", "A", "o").with_status("todo"),
            Task::new("a", "A again", "o").with_status("done"),
        ];
        let (store, columns, report) = load_board(tasks, &layout, &statuses).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(ids(&columns, "todo"), vec!["a"]);
        assert!(ids(&columns, "done").is_empty());
        assert_eq!(report.duplicates, vec![TaskId::from("a")]);
    }
}
