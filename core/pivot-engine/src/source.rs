//! FILENAME: core/pivot-engine/src/source.rs
//! Data Source - The interfaces the engine consumes.
//!
//! The engine never aggregates. A `DataSource` groups, aggregates and sorts
//! the fact table and hands back one record per distinct dimension tuple.
//! A `SchemaSource` describes a table's columns for the surrounding
//! application; the pivot algorithm itself does not use it.

use serde::{Deserialize, Serialize};

use crate::definition::ValueField;
use crate::error::SourceError;

/// One aggregated row returned by a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Dimension values, positional in the requested dimension order.
    pub dimensions: Vec<String>,

    /// Aggregated measure values, positional in the requested value field
    /// order. `None` when the aggregate is undefined (e.g. all inputs null).
    pub measures: Vec<Option<f64>>,
}

impl SourceRecord {
    pub fn new<S: Into<String>>(
        dimensions: impl IntoIterator<Item = S>,
        measures: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        SourceRecord {
            dimensions: dimensions.into_iter().map(Into::into).collect(),
            measures: measures.into_iter().collect(),
        }
    }

    /// Convenience for records whose measures are all present.
    pub fn with_values<S: Into<String>>(
        dimensions: impl IntoIterator<Item = S>,
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        SourceRecord::new(dimensions, values.into_iter().map(Some))
    }

    pub fn measure(&self, index: usize) -> Option<f64> {
        self.measures.get(index).copied().flatten()
    }
}

/// Aggregating query interface.
///
/// Implementations must return records sorted ascending by the full
/// `dimensions` tuple, with empty text values normalized to
/// [`OTHER_LABEL`](crate::definition::OTHER_LABEL).
pub trait DataSource {
    fn query(
        &self,
        table: &str,
        dimensions: &[String],
        measures: &[ValueField],
    ) -> Result<Vec<SourceRecord>, SourceError>;
}

/// Storage type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Real)
    }
}

/// Description of a single table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        ColumnInfo {
            name: name.into(),
            column_type,
        }
    }
}

/// Schema introspection interface.
pub trait SchemaSource {
    fn table_info(&self, table: &str) -> Result<Vec<ColumnInfo>, SourceError>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn query(
        &self,
        table: &str,
        dimensions: &[String],
        measures: &[ValueField],
    ) -> Result<Vec<SourceRecord>, SourceError> {
        (**self).query(table, dimensions, measures)
    }
}

impl<T: SchemaSource + ?Sized> SchemaSource for &T {
    fn table_info(&self, table: &str) -> Result<Vec<ColumnInfo>, SourceError> {
        (**self).table_info(table)
    }
}
