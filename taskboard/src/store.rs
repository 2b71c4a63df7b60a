//! TaskStore - the canonical set of tasks for one load cycle

use crate::types::{Task, TaskId};
use indexmap::IndexMap;

/// Tasks keyed by id, kept in fetch order.
///
/// Entries are immutable snapshots; a refresh replaces the whole store.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: IndexMap<TaskId, Task>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task. Returns false (and keeps the existing entry) on a duplicate id.
    pub fn insert(&mut self, task: Task) -> bool {
        if self.tasks.contains_key(&task.id) {
            return false;
        }
        self.tasks.insert(task.id.clone(), task);
        true
    }

    /// Look up a task
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// True if the task exists
    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True if the store is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterate tasks in fetch order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }
}

impl FromIterator<Task> for TaskStore {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut store = Self::new();
        for task in iter {
            store.insert(task);
        }
        store
    }
}
