//! FILENAME: core/fact-table/src/lib.rs
//! In-memory fact tables.
//!
//! Provides a `Catalog` of named tables that implements the pivot engine's
//! `DataSource` (group, aggregate and sort) and `SchemaSource` (column
//! listing) interfaces, and loads from JSON.

mod error;
mod query;
mod table;

pub use error::FactTableError;
pub use query::{aggregate_table, Accumulator};
pub use table::{Catalog, FactTable, FactValue};
