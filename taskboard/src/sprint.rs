//! Sprint filtering over the current columns.
//!
//! Pure derivation: sprints never mutate the board, and the intersection is
//! recomputed from whatever the columns hold right now.

use crate::columns::ColumnSet;
use crate::types::{Column, ColumnId, Sprint, SprintId, TaskId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One column as seen through a sprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredColumn {
    pub column_id: ColumnId,
    pub task_ids: Vec<TaskId>,
}

/// Every column of the board as seen through one sprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SprintColumns {
    pub sprint_id: SprintId,
    pub name: String,
    pub columns: Vec<FilteredColumn>,
}

impl SprintColumns {
    /// Number of sprint tasks currently on the board
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.task_ids.len()).sum()
    }
}

/// A column's tasks restricted to a sprint, in column order
pub fn filter_column(column: &Column, sprint: &Sprint) -> Vec<TaskId> {
    column
        .task_ids
        .iter()
        .filter(|id| sprint.contains(id))
        .cloned()
        .collect()
}

/// Per-sprint, per-column filtered task lists
pub fn partition_sprints(columns: &ColumnSet, sprints: &[Sprint]) -> Vec<SprintColumns> {
    sprints
        .iter()
        .map(|sprint| SprintColumns {
            sprint_id: sprint.id.clone(),
            name: sprint.name.clone(),
            columns: columns
                .iter()
                .map(|col| FilteredColumn {
                    column_id: col.id.clone(),
                    task_ids: filter_column(col, sprint),
                })
                .collect(),
        })
        .collect()
}

/// The sprint whose time box contains `at`; the latest-starting one wins on overlap
pub fn active_sprint(sprints: &[Sprint], at: DateTime<Utc>) -> Option<&Sprint> {
    sprints
        .iter()
        .filter(|s| s.is_active_at(at))
        .max_by_key(|s| s.start_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnSpec, OwnerId};
    use chrono::TimeZone;

    fn sprint(id: &str, tasks: &[&str], start_day: u32, end_day: u32) -> Sprint {
        Sprint {
            id: SprintId::from(id),
            name: format!("Sprint {id}"),
            goal: String::new(),
            start_date: Utc.with_ymd_and_hms(2024, 3, start_day, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 3, end_day, 0, 0, 0).unwrap(),
            owner_id: OwnerId::from("lead"),
            task_ids: tasks.iter().map(|t| TaskId::from(*t)).collect(),
        }
    }

    fn columns() -> ColumnSet {
        let mut set = ColumnSet::new(&[
            ColumnSpec::new("todo", "To Do"),
            ColumnSpec::new("done", "Done"),
        ])
        .unwrap();
        for id in ["a", "b", "c"] {
            set.push(&ColumnId::from("todo"), TaskId::from(id)).unwrap();
        }
        set.push(&ColumnId::from("done"), TaskId::from("d")).unwrap();
        set
    }

    #[test]
    fn test_partition_preserves_column_order() {
        let views = partition_sprints(&columns(), &[sprint("1", &["c", "a", "d"], 1, 14)]);
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.columns[0].column_id.as_str(), "todo");
        assert_eq!(
            view.columns[0].task_ids,
            vec![TaskId::from("a"), TaskId::from("c")]
        );
        assert_eq!(view.columns[1].task_ids, vec![TaskId::from("d")]);
        assert_eq!(view.task_count(), 3);
    }

    #[test]
    fn test_empty_intersection_renders_empty_columns() {
        let views = partition_sprints(&columns(), &[sprint("2", &["zz"], 1, 14)]);
        assert_eq!(views[0].columns.len(), 2);
        assert!(views[0].columns.iter().all(|c| c.task_ids.is_empty()));
    }

    #[test]
    fn test_active_sprint() {
        let sprints = vec![sprint("1", &[], 1, 14), sprint("2", &[], 10, 24)];
        let at = |day| Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        assert_eq!(active_sprint(&sprints, at(5)).unwrap().id.as_str(), "1");
        assert_eq!(active_sprint(&sprints, at(12)).unwrap().id.as_str(), "2");
        assert!(active_sprint(&sprints, at(28)).is_none());
    }
}
