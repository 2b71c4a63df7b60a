//! Wire types for the remote task store

use super::error::SyncError;
use crate::types::{OwnerId, Priority, Sprint, SprintId, Task, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as returned by `GET tasks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: OwnerId,
    pub status: String,
    #[serde(default)]
    pub priority: i64,
    pub created_at: DateTime<Utc>,
}

impl From<RemoteTask> for Task {
    fn from(remote: RemoteTask) -> Self {
        Task {
            id: remote.id,
            title: remote.title,
            description: remote.description.unwrap_or_default(),
            owner_id: remote.owner_id,
            priority: Priority::from_code(remote.priority),
            created_at: remote.created_at,
            status: remote.status,
        }
    }
}

/// A sprint as returned by `GET tasks/fetch`, with its tasks nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSprint {
    pub id: SprintId,
    pub name: String,
    #[serde(default)]
    pub goal: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub owner_id: OwnerId,
    #[serde(default)]
    pub tasks: Vec<RemoteTask>,
}

impl From<RemoteSprint> for Sprint {
    fn from(remote: RemoteSprint) -> Self {
        Sprint {
            id: remote.id,
            name: remote.name,
            goal: remote.goal.unwrap_or_default(),
            start_date: remote.start_date,
            end_date: remote.end_date,
            owner_id: remote.owner_id,
            task_ids: remote.tasks.into_iter().map(|t| t.id).collect(),
        }
    }
}

/// Body of `POST tasks/update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub id: TaskId,
    pub owner_id: OwnerId,
    pub status: String,
}

/// Acknowledgement of a status update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncAck {
    pub task_id: TaskId,
    pub status: String,
}

/// Outcome of one dispatch, delivered back to the board owner
#[derive(Debug)]
pub struct SyncReport {
    pub task_id: TaskId,
    /// Per-task sequence number assigned when the dispatch was issued
    pub seq: u64,
    pub status: String,
    /// Attempts made, including the first
    pub attempts: u32,
    pub result: Result<SyncAck, SyncError>,
}

impl SyncReport {
    /// True if the backend acknowledged the update
    pub fn is_ack(&self) -> bool {
        self.result.is_ok()
    }
}
