//! TaskBoard - the single writer that ties the engine to the remote store.
//!
//! A move is applied to the engine first and becomes visible immediately;
//! the status update, if one is needed, is dispatched afterwards and its
//! report is folded back in by `poll_reports` or `settle`.

use crate::config::{BoardConfig, FailurePolicy, SyncConfig};
use crate::engine::{BoardEngine, MoveOutcome};
use crate::error::Result;
use crate::load::{LoadReport, UnmatchedStatus};
use crate::logging::init_logging;
use crate::sprint::{partition_sprints, SprintColumns};
use crate::sync::{HttpTaskRemote, RetryPolicy, StatusSyncClient, SyncReport, TaskRemote};
use crate::types::{ColumnSpec, MoveRequest, Sprint, SprintId, Task, TaskId};
use crate::view::BoardView;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Something the UI should surface, e.g. as a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub task_id: Option<TaskId>,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, task_id: Option<TaskId>, message: impl Into<String>) -> Self {
        Self {
            level,
            task_id,
            message: message.into(),
        }
    }
}

/// A status the backend holds, and the dispatch that put it there (0 = load)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Acknowledged {
    seq: u64,
    status: String,
}

/// A loaded board with its sync client
pub struct TaskBoard {
    engine: BoardEngine,
    sync: StatusSyncClient,
    policy: FailurePolicy,
    /// Last status the backend confirmed, per task
    acknowledged: HashMap<TaskId, Acknowledged>,
    /// Sequence of the newest dispatch per task that resolved as a failure
    failed: HashMap<TaskId, u64>,
    sprints: Vec<Sprint>,
    load_report: LoadReport,
    notices: Vec<Notice>,
}

impl TaskBoard {
    /// Connect to the configured backend and load the board
    pub async fn open(config: &BoardConfig) -> Result<Self> {
        init_logging(&config.log_level);
        let remote = HttpTaskRemote::new(&config.api)?;
        Self::load(Arc::new(remote), &config.columns, &config.sync).await
    }

    /// Load a board from any remote store
    pub async fn load(
        remote: Arc<dyn TaskRemote>,
        columns: &[ColumnSpec],
        sync: &SyncConfig,
    ) -> Result<Self> {
        let mut board = Self {
            engine: BoardEngine::new(columns)?,
            sync: StatusSyncClient::new(remote, RetryPolicy::from(sync)),
            policy: sync.on_failure,
            acknowledged: HashMap::new(),
            failed: HashMap::new(),
            sprints: Vec::new(),
            load_report: LoadReport::default(),
            notices: Vec::new(),
        };
        board.reload().await?;
        Ok(board)
    }

    /// Re-fetch tasks and sprints, replacing the board.
    ///
    /// Sequence numbers are kept, so reports for dispatches issued before the
    /// reload are still recognised as stale when a newer one exists.
    pub async fn reload(&mut self) -> Result<()> {
        let remote = Arc::clone(self.sync.remote());

        let tasks: Vec<Task> = remote
            .fetch_tasks()
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        // The fetched status supersedes every dispatch issued so far
        self.acknowledged = tasks
            .iter()
            .map(|t| {
                let ack = Acknowledged {
                    seq: self.sync.latest_seq(&t.id).unwrap_or(0),
                    status: t.status.clone(),
                };
                (t.id.clone(), ack)
            })
            .collect();
        self.failed.clear();
        self.load_report = self.engine.load(tasks)?;

        for unmatched in &self.load_report.unmatched {
            self.notices.push(Notice::new(
                NoticeLevel::Warning,
                Some(unmatched.task_id.clone()),
                format!("status '{}' matches no column", unmatched.status),
            ));
        }

        // Sprints are an optional lens; the board works without them.
        match remote.fetch_sprints().await {
            Ok(sprints) => self.sprints = sprints.into_iter().map(Sprint::from).collect(),
            Err(e) => {
                warn!(error = %e, "failed to load sprints");
                self.sprints.clear();
                self.notices.push(Notice::new(
                    NoticeLevel::Warning,
                    None,
                    format!("sprints unavailable: {e}"),
                ));
            }
        }

        info!(
            tasks = self.engine.store().len(),
            sprints = self.sprints.len(),
            "board ready"
        );
        Ok(())
    }

    /// Apply a completed drag gesture and dispatch the status update it needs.
    ///
    /// The move is committed before the dispatch is issued and is not undone
    /// if the dispatch fails, unless the failure policy is `revert`.
    pub fn apply_move(&mut self, mv: Option<&MoveRequest>) -> Result<MoveOutcome> {
        let outcome = self.engine.apply_move(mv)?;
        if let Some(update) = outcome.sync_update() {
            self.sync.dispatch(update.clone());
        }
        Ok(outcome)
    }

    /// Fold in every report that is already available. Returns how many were taken.
    pub fn poll_reports(&mut self) -> usize {
        let mut taken = 0;
        while let Some(report) = self.sync.try_next_report() {
            self.handle_report(report);
            taken += 1;
        }
        taken
    }

    /// Wait for every in-flight dispatch and fold in its report
    pub async fn settle(&mut self) {
        while let Some(report) = self.sync.next_report().await {
            self.handle_report(report);
        }
    }

    fn handle_report(&mut self, report: SyncReport) {
        let current = self.sync.is_current(&report);

        match report.result {
            Ok(ack) => {
                let newer = self
                    .acknowledged
                    .get(&ack.task_id)
                    .map_or(true, |known| known.seq < report.seq);
                if !newer {
                    debug!(task = %ack.task_id, seq = report.seq, "ignoring superseded acknowledgement");
                    return;
                }
                debug!(task = %ack.task_id, seq = report.seq, status = %ack.status, "status acknowledged");
                self.acknowledged.insert(
                    ack.task_id.clone(),
                    Acknowledged {
                        seq: report.seq,
                        status: ack.status,
                    },
                );

                // A later move already failed and was reverted to an older status
                let latest_failed = self.failed.get(&ack.task_id).copied()
                    == self.sync.latest_seq(&ack.task_id);
                if !current && latest_failed && self.policy == FailurePolicy::Revert {
                    self.revert(&ack.task_id);
                }
            }
            Err(e) => {
                if !current {
                    debug!(task = %report.task_id, seq = report.seq, "discarding stale sync failure");
                    return;
                }
                warn!(
                    task = %report.task_id,
                    status = %report.status,
                    attempts = report.attempts,
                    error = %e,
                    "status update failed"
                );
                self.failed.insert(report.task_id.clone(), report.seq);
                self.notices.push(Notice::new(
                    NoticeLevel::Error,
                    Some(report.task_id.clone()),
                    format!("could not save status '{}': {e}", report.status),
                ));
                if self.policy == FailurePolicy::Revert {
                    self.revert(&report.task_id);
                }
            }
        }
    }

    fn revert(&mut self, task_id: &TaskId) {
        let Some(column) = self
            .acknowledged
            .get(task_id)
            .and_then(|ack| self.engine.statuses().column_of(&ack.status))
            .cloned()
        else {
            return;
        };

        match self.engine.relocate_to_end(task_id, &column) {
            Ok(true) => {
                info!(task = %task_id, column = %column, "reverted to last saved column");
                self.notices.push(Notice::new(
                    NoticeLevel::Info,
                    Some(task_id.clone()),
                    format!("moved back to '{column}'"),
                ));
            }
            Ok(false) => {}
            Err(e) => warn!(task = %task_id, error = %e, "revert failed"),
        }
    }

    /// Tasks whose column differs from their last acknowledged status
    pub fn diverged(&self) -> Vec<TaskId> {
        self.engine
            .columns()
            .iter()
            .flat_map(|col| col.task_ids.iter().map(move |id| (id, &col.id)))
            .filter(|(id, column)| {
                let acked = self
                    .acknowledged
                    .get(*id)
                    .and_then(|ack| self.engine.statuses().column_of(&ack.status));
                acked != Some(*column)
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// The board engine
    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    /// Dispatches not yet folded in
    pub fn pending_syncs(&self) -> usize {
        self.sync.in_flight()
    }

    /// Loaded sprints
    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    /// Sprint lenses over the current columns
    pub fn sprint_columns(&self) -> Vec<SprintColumns> {
        partition_sprints(self.engine.columns(), &self.sprints)
    }

    /// Display projection, optionally narrowed to a sprint
    pub fn view(&self, sprint: Option<&SprintId>) -> BoardView {
        let sprint = sprint.and_then(|id| self.sprints.iter().find(|s| &s.id == id));
        BoardView::project(&self.engine, sprint)
    }

    /// Tasks from the last load whose status matched no column
    pub fn unmatched(&self) -> &[UnmatchedStatus] {
        &self.load_report.unmatched
    }

    /// Conditions recorded by the last load
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Take all pending notices
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
