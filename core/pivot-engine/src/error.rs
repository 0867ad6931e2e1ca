//! FILENAME: core/pivot-engine/src/error.rs

use thiserror::Error;

/// Errors raised by a data source or schema source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("Table not found: {0}")]
    UnknownTable(String),

    #[error("Column '{column}' not found in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Column '{column}' in table '{table}' is not numeric")]
    NotNumeric { table: String, column: String },

    #[error("Data source error: {0}")]
    Backend(String),
}

/// Errors raised while formatting a single value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Integer format applied to non-integral value {0}")]
    NonIntegral(f64),

    #[error("Cannot format non-finite value {0}")]
    NotFinite(f64),
}

/// Errors raised by a pivot computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PivotError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Format error at row {row}, column {col}: {source}")]
    Format {
        row: usize,
        col: usize,
        #[source]
        source: FormatError,
    },
}
