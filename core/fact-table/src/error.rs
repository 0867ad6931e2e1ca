//! FILENAME: core/fact-table/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactTableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {row} of table '{table}' has {found} values, expected {expected}")]
    RowArity {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate table: {0}")]
    DuplicateTable(String),
}
