//! Column ⇄ status string table.
//!
//! The backend stores a task's stage as a space separated, lower-case string
//! (`ready for staging`); the board keys columns by dash separated ids
//! (`ready-for-staging`). The table is built once from the column order and
//! is bijective over it.

use crate::error::{BoardError, Result};
use crate::types::{ColumnId, COLUMN_SEPARATOR};
use std::collections::HashMap;

/// Bijective mapping between column ids and backend status strings
#[derive(Debug, Clone, Default)]
pub struct StatusMap {
    to_status: HashMap<ColumnId, String>,
    to_column: HashMap<String, ColumnId>,
}

impl StatusMap {
    /// Build the table for an ordered set of columns
    pub fn new<'a>(columns: impl IntoIterator<Item = &'a ColumnId>) -> Result<Self> {
        let mut map = Self::default();
        for column in columns {
            let status = column_to_status(column);
            if let Some(existing) = map.to_column.get(&status) {
                return Err(BoardError::StatusCollision {
                    first: existing.to_string(),
                    second: column.to_string(),
                    status,
                });
            }
            map.to_column.insert(status.clone(), column.clone());
            map.to_status.insert(column.clone(), status);
        }
        Ok(map)
    }

    /// Status string for a column on this board
    pub fn status_of(&self, column: &ColumnId) -> Option<&str> {
        self.to_status.get(column).map(String::as_str)
    }

    /// Column for a status string as fetched from the backend.
    ///
    /// Matching ignores case, surrounding whitespace and runs of spaces.
    pub fn column_of(&self, status: &str) -> Option<&ColumnId> {
        self.to_column.get(&normalize_status(status))
    }

    /// Number of mapped columns
    pub fn len(&self) -> usize {
        self.to_status.len()
    }

    /// True if no columns are mapped
    pub fn is_empty(&self) -> bool {
        self.to_status.is_empty()
    }
}

/// Derive a status string from a column id
pub fn column_to_status(column: &ColumnId) -> String {
    column.as_str().replace(COLUMN_SEPARATOR, " ")
}

/// Derive the column id token a status string names
pub fn status_to_column_token(status: &str) -> String {
    normalize_status(status).replace(' ', &COLUMN_SEPARATOR.to_string())
}

fn normalize_status(status: &str) -> String {
    status
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
