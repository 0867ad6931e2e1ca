//! FILENAME: app/src/error.rs

use fact_table::FactTableError;
use pivot_engine::{PivotError, SourceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("No data_path configured")]
    MissingDataPath,

    #[error("Data error: {0}")]
    Data(#[from] FactTableError),

    #[error("Pivot error: {0}")]
    Pivot(#[from] PivotError),

    #[error("Schema error: {0}")]
    Schema(#[from] SourceError),
}
