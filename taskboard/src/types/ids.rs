//! Newtype identifiers for board entities.
//!
//! Ids are opaque strings issued by the remote store, except `ColumnId`
//! which is fixed at startup and validated by [`ColumnId::parse`].

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing string id
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a task, as issued by the remote store
    TaskId
);
define_id!(
    /// Identifier of the employee that owns a task or sprint
    OwnerId
);
define_id!(
    /// Identifier of a sprint
    SprintId
);
define_id!(
    /// Identifier of a workflow column, e.g. `ready-for-staging`
    ColumnId
);

/// Separator between words in a column id
pub const COLUMN_SEPARATOR: char = '-';

impl ColumnId {
    /// Parse a column id, requiring lower-case ascii words joined by single dashes.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = |reason: &str| BoardError::InvalidColumnId {
            id: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("empty"));
        }
        if s.split(COLUMN_SEPARATOR).any(str::is_empty) {
            return Err(invalid("empty word"));
        }
        if !s
            .chars()
            .all(|c| c == COLUMN_SEPARATOR || c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(invalid("only lower-case letters, digits and '-' allowed"));
        }
        Ok(Self(s.to_string()))
    }
}
