//! Read-only projection of the board for display

use crate::engine::BoardEngine;
use crate::sprint::filter_column;
use crate::types::{ColumnId, OwnerId, Sprint, SprintId, TaskId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A card as rendered in a column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: TaskId,
    pub title: String,
    pub owner_id: OwnerId,
    pub priority: &'static str,
    pub created_at: DateTime<Utc>,
}

/// A column as rendered on the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    pub status: String,
    pub cards: Vec<CardView>,
}

/// The whole board, optionally narrowed to one sprint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub sprint: Option<SprintId>,
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Project the engine's current state
    pub fn project(engine: &BoardEngine, sprint: Option<&Sprint>) -> Self {
        let columns = engine
            .columns()
            .iter()
            .map(|col| {
                let ids = match sprint {
                    Some(sprint) => filter_column(col, sprint),
                    None => col.task_ids.clone(),
                };
                let cards = ids
                    .iter()
                    .filter_map(|id| engine.store().get(id))
                    .map(|task| CardView {
                        id: task.id.clone(),
                        title: task.title.clone(),
                        owner_id: task.owner_id.clone(),
                        priority: task.priority.label(),
                        created_at: task.created_at,
                    })
                    .collect();
                ColumnView {
                    id: col.id.clone(),
                    title: col.title.clone(),
                    status: engine
                        .statuses()
                        .status_of(&col.id)
                        .unwrap_or_default()
                        .to_string(),
                    cards,
                }
            })
            .collect();

        Self {
            sprint: sprint.map(|s| s.id.clone()),
            columns,
        }
    }

    /// Total cards shown
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_columns;
    use crate::types::{Priority, Task};

    fn engine() -> BoardEngine {
        let mut engine = BoardEngine::new(&default_columns()).unwrap();
        engine
            .load(vec![
                Task::new("a", "Approve leave", "emp-1")
                    .with_status("todo")
                    .with_priority(Priority::High),
                Task::new("b", "Schedule review", "emp-2").with_status("done"),
            ])
            .unwrap();
        engine
    }

    #[test]
    fn test_project_whole_board() {
        let view = BoardView::project(&engine(), None);
        assert_eq!(view.columns.len(), 8);
        assert_eq!(view.card_count(), 2);
        let todo = &view.columns[0];
        assert_eq!(todo.title, "To Do");
        assert_eq!(todo.cards[0].priority, "High");
        assert_eq!(view.columns[1].status, "in progress");
        assert_eq!(view.columns[6].cards[0].priority, "Unclassified");
    }

    #[test]
    fn test_project_through_sprint() {
        let sprint = Sprint {
            id: SprintId::from("s1"),
            name: "March".into(),
            goal: String::new(),
            start_date: Utc::now(),
            end_date: Utc::now(),
            owner_id: OwnerId::from("lead"),
            task_ids: [TaskId::from("b")].into_iter().collect(),
        };
        let view = BoardView::project(&engine(), Some(&sprint));
        assert_eq!(view.sprint, Some(SprintId::from("s1")));
        assert_eq!(view.card_count(), 1);
        assert!(view.columns[0].cards.is_empty());
    }

    #[test]
    fn test_view_serializes() {
        let value = serde_json::to_value(BoardView::project(&engine(), None)).unwrap();
        assert_eq!(value["columns"][0]["cards"][0]["title"], "Approve leave");
    }
}
