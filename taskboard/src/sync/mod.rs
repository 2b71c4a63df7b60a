//! Remote store access and the fire-and-forget status sync client

mod client;
mod error;
mod remote;
mod types;

pub use client::{RetryPolicy, StatusSyncClient};
pub use error::SyncError;
pub use remote::{HttpTaskRemote, TaskRemote};
pub use types::{RemoteSprint, RemoteTask, StatusUpdate, SyncAck, SyncReport};
