//! Kanban board ordering engine with optimistic remote status sync
//!
//! This crate holds tasks in ordered workflow columns, applies completed
//! drag gestures to them, and keeps each task's persisted status in step
//! with the column it sits in.
//!
//! ## Overview
//!
//! - **Columns partition tasks** - every placed task is in exactly one column
//! - **Optimistic moves** - a move is committed locally before the backend hears of it
//! - **Column membership is the persisted fact** - reordering within a column never syncs
//! - **Sequenced sync** - each status update carries a per-task sequence number
//!   so late acknowledgements of older moves are ignored
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard::{BoardConfig, MoveRequest, Slot, TaskBoard};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BoardConfig::load(None)?;
//! let mut board = TaskBoard::open(&config).await?;
//!
//! // A card was dragged from the top of "todo" to the top of "in-progress"
//! let mv = MoveRequest::new("task-1", Slot::new("todo", 0), Slot::new("in-progress", 0));
//! let outcome = board.apply_move(Some(&mv))?;
//! assert!(outcome.is_moved());
//!
//! // Later, on the same thread
//! board.poll_reports();
//! for notice in board.drain_notices() {
//!     println!("{}", notice.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Remote protocol
//!
//! ```text
//! GET  {base}/tasks          -> [task]
//! GET  {base}/tasks/fetch    -> [sprint with nested tasks]
//! POST {base}/tasks/update   <- {id, ownerId, status}
//! ```

mod columns;
pub mod config;
pub mod defaults;
mod engine;
mod error;
pub mod load;
pub mod logging;
mod session;
pub mod sprint;
pub mod status;
mod store;
pub mod sync;
pub mod types;
pub mod view;

pub use columns::ColumnSet;
pub use config::{BoardConfig, ConfigError, FailurePolicy};
pub use engine::{BoardEngine, MoveOutcome};
pub use error::{BoardError, Result};
pub use load::{LoadReport, UnmatchedStatus};
pub use session::{Notice, NoticeLevel, TaskBoard};
pub use status::StatusMap;
pub use store::TaskStore;
pub use sync::{StatusSyncClient, StatusUpdate, SyncError, TaskRemote};
pub use view::BoardView;

// Re-export commonly used types
pub use types::{
    Column, ColumnId, ColumnSpec, MoveRequest, OwnerId, Priority, Slot, Sprint, SprintId, Task,
    TaskId,
};
