//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot reshape engine.
//!
//! Takes pre-aggregated, sorted long-format records and reshapes them into a
//! sparse cross-tab with run-length encoded row and column headers. The
//! engine never aggregates; a `DataSource` does that upstream.
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot IS)
//! - `source`: Interfaces the engine consumes (WHERE the data comes from)
//! - `matrix`: Sparse matrix builder (HOW rows become a grid)
//! - `labels`: Label compressor (HOW keys become header spans)
//! - `format`: Number formatting for value cells
//! - `view`: Renderable payload (WHAT we display)
//! - `engine`: Orchestration (HOW the pieces fit)

pub mod definition;
pub mod engine;
pub mod error;
pub mod format;
pub mod key;
pub mod labels;
pub mod matrix;
pub mod source;
pub mod view;

pub use definition::*;
pub use engine::{calculate_pivot, reshape_records};
pub use error::{FormatError, PivotError, SourceError};
pub use format::{format_cell, format_number, NumberFormat};
pub use key::AxisKey;
pub use labels::{compress_labels, title_case};
pub use matrix::{build_matrix, Cell, SparseMatrix};
pub use source::{ColumnInfo, ColumnType, DataSource, SchemaSource, SourceRecord};
pub use view::*;
