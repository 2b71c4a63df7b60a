//! Core types for the board engine

mod board;
mod ids;
mod position;
mod sprint;
mod task;

// Re-export all types
pub use board::{Column, ColumnSpec};
pub use ids::{ColumnId, OwnerId, SprintId, TaskId, COLUMN_SEPARATOR};
pub use position::{MoveRequest, Slot};
pub use sprint::Sprint;
pub use task::{Priority, Task};
