//! StatusSyncClient - issues status updates without blocking the board owner.
//!
//! Each dispatch is tagged with a per-task sequence number and runs on the
//! tokio runtime. Outcomes come back as [`SyncReport`]s from a join set that
//! the owner drains; the client itself never touches board state. A dispatch
//! task that dies still yields a failed report.

use super::error::SyncError;
use super::remote::TaskRemote;
use super::types::{StatusUpdate, SyncAck, SyncReport};
use crate::config::SyncConfig;
use crate::types::TaskId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, warn};

/// Bounded exponential backoff for retryable dispatch failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl From<&SyncConfig> for RetryPolicy {
    fn from(config: &SyncConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }
}

/// Fire-and-forget dispatcher of status updates
pub struct StatusSyncClient {
    remote: Arc<dyn TaskRemote>,
    retry: RetryPolicy,
    issued: HashMap<TaskId, u64>,
    running: JoinSet<SyncReport>,
    /// What each running dispatch was sending, for reports of tasks that died
    pending: HashMap<task::Id, (u64, StatusUpdate)>,
}

impl StatusSyncClient {
    /// Create a client over a remote store
    pub fn new(remote: Arc<dyn TaskRemote>, retry: RetryPolicy) -> Self {
        Self {
            remote,
            retry,
            issued: HashMap::new(),
            running: JoinSet::new(),
            pending: HashMap::new(),
        }
    }

    /// The remote store this client writes to
    pub fn remote(&self) -> &Arc<dyn TaskRemote> {
        &self.remote
    }

    /// Issue an update and return its sequence number without waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, update: StatusUpdate) -> u64 {
        let seq = self.issued.entry(update.id.clone()).or_insert(0);
        *seq += 1;
        let seq = *seq;

        debug!(task = %update.id, seq, status = %update.status, "dispatching status update");

        let remote = Arc::clone(&self.remote);
        let retry = self.retry;
        let sent = update.clone();
        let handle = self.running.spawn(async move {
            let (attempts, result) = send_with_retry(remote.as_ref(), &sent, retry).await;
            SyncReport {
                task_id: sent.id,
                seq,
                status: sent.status,
                attempts,
                result,
            }
        });
        self.pending.insert(handle.id(), (seq, update));

        seq
    }

    /// Latest sequence number issued for a task
    pub fn latest_seq(&self, task_id: &TaskId) -> Option<u64> {
        self.issued.get(task_id).copied()
    }

    /// True if no later dispatch has been issued for the report's task
    pub fn is_current(&self, report: &SyncReport) -> bool {
        self.latest_seq(&report.task_id) == Some(report.seq)
    }

    /// Number of dispatches whose reports have not been taken yet
    pub fn in_flight(&self) -> usize {
        self.running.len()
    }

    /// Take a report if one is ready
    pub fn try_next_report(&mut self) -> Option<SyncReport> {
        loop {
            let joined = self.running.try_join_next_with_id()?;
            if let Some(report) = self.finish(joined) {
                return Some(report);
            }
        }
    }

    /// Wait for the next report. Returns `None` when nothing is in flight.
    pub async fn next_report(&mut self) -> Option<SyncReport> {
        loop {
            let joined = self.running.join_next_with_id().await?;
            if let Some(report) = self.finish(joined) {
                return Some(report);
            }
        }
    }

    fn finish(&mut self, joined: Result<(task::Id, SyncReport), JoinError>) -> Option<SyncReport> {
        match joined {
            Ok((id, report)) => {
                self.pending.remove(&id);
                Some(report)
            }
            Err(e) => {
                let (seq, update) = self.pending.remove(&e.id())?;
                warn!(task = %update.id, seq, error = %e, "status dispatch task died");
                Some(SyncReport {
                    task_id: update.id,
                    seq,
                    status: update.status,
                    attempts: 1,
                    result: Err(SyncError::Dispatch(e.to_string())),
                })
            }
        }
    }
}

async fn send_with_retry(
    remote: &dyn TaskRemote,
    update: &StatusUpdate,
    retry: RetryPolicy,
) -> (u32, Result<SyncAck, SyncError>) {
    let mut attempt = 1;
    loop {
        match remote.update_status(update).await {
            Ok(ack) => return (attempt, Ok(ack)),
            Err(e) if e.is_retryable() && attempt < retry.max_attempts => {
                let delay = retry.backoff(attempt);
                warn!(
                    task = %update.id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "status update failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return (attempt, Err(e)),
        }
    }
}
