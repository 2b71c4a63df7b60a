//! Built-in column order.
//!
//! `default_columns()` is the workflow used when configuration does not
//! declare its own columns.

use crate::types::ColumnSpec;

/// Built-in workflow columns, in display order
pub fn default_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("todo", "To Do"),
        ColumnSpec::new("in-progress", "In Progress"),
        ColumnSpec::new("ready-for-staging", "Ready for Staging"),
        ColumnSpec::new("staging", "Staging"),
        ColumnSpec::new("ready-for-production", "Ready for Production"),
        ColumnSpec::new("production", "Production"),
        ColumnSpec::new("done", "Done"),
        ColumnSpec::new("block", "Blocked"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnId;

    #[test]
    fn test_default_columns_are_valid_ids() {
        let cols = default_columns();
        assert_eq!(cols.len(), 8);
        assert_eq!(cols[0].id, "todo");
        assert_eq!(cols[7].id, "block");
        for col in &cols {
            assert!(ColumnId::parse(&col.id).is_ok(), "bad id {}", col.id);
        }
    }
}
