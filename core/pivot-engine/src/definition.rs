//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a pivot request.
//! These structures are designed to be:
//! - Serializable (for config files and request payloads)
//! - Resolved before the engine runs (aggregation is a plain enum)
//! - Immutable snapshots of user intent

use serde::{Deserialize, Serialize};

use crate::format::NumberFormat;

/// Name used for an axis that has no configured dimensions.
pub const DEFAULT_AXIS_NAME: &str = "Vote";

/// Synthetic label for the single key of an axis with no dimensions.
pub const TOTAL_LABEL: &str = "Total";

/// Sentinel that upstream sources substitute for empty dimension values.
pub const OTHER_LABEL: &str = "OTHER";

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for value fields.
///
/// The engine never executes these; the data source does. The variant only
/// travels with the request so the source knows what to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AggregationType {
    #[default]
    Sum,
    Count,
    Average,
    Min,
    Max,
}

impl AggregationType {
    /// SQL-style display name ("sum", "avg", ...).
    pub fn display_name(&self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Count => "count",
            AggregationType::Average => "avg",
            AggregationType::Min => "min",
            AggregationType::Max => "max",
        }
    }
}

// ============================================================================
// FIELD DEFINITIONS
// ============================================================================

/// A measure placed in the Values area, with its aggregation function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueField {
    /// Name of the numeric source column. Also used as the column family
    /// prefix when more than one value field is requested.
    pub name: String,

    /// The aggregation function the source applies.
    #[serde(default)]
    pub aggregation: AggregationType,
}

impl ValueField {
    pub fn new(name: impl Into<String>, aggregation: AggregationType) -> Self {
        ValueField {
            name: name.into(),
            aggregation,
        }
    }

    /// Shorthand for the common `Sum` measure.
    pub fn sum(name: impl Into<String>) -> Self {
        ValueField::new(name, AggregationType::Sum)
    }

    /// Label shown to users, e.g. "sum(Votes)".
    pub fn label(&self) -> String {
        format!("{}({})", self.aggregation.display_name(), self.name)
    }
}

// ============================================================================
// MAIN DEFINITION STRUCT
// ============================================================================

fn default_axis_name() -> String {
    DEFAULT_AXIS_NAME.to_string()
}

/// The complete definition of a pivot request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Source table name passed to the data source.
    pub table: String,

    /// Dimensions placed in the Row area (ordered from outer to inner).
    #[serde(default)]
    pub row_fields: Vec<String>,

    /// Dimensions placed in the Column area (ordered from outer to inner).
    #[serde(default)]
    pub column_fields: Vec<String>,

    /// Measures, in the order the user requested them.
    #[serde(default)]
    pub value_fields: Vec<ValueField>,

    /// Number format applied to every value cell.
    #[serde(default)]
    pub number_format: NumberFormat,

    /// Axis name used when an axis has no dimensions.
    #[serde(default = "default_axis_name")]
    pub placeholder_axis_name: String,
}

impl PivotDefinition {
    /// Creates a definition with no fields placed yet.
    pub fn new(table: impl Into<String>) -> Self {
        PivotDefinition {
            table: table.into(),
            row_fields: Vec::new(),
            column_fields: Vec::new(),
            value_fields: Vec::new(),
            number_format: NumberFormat::default(),
            placeholder_axis_name: default_axis_name(),
        }
    }

    pub fn with_rows<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.row_fields = rows.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_fields = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_values(mut self, values: Vec<ValueField>) -> Self {
        self.value_fields = values;
        self
    }

    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Dimensions to request from the source: rows followed by columns.
    pub fn query_dimensions(&self) -> Vec<String> {
        self.row_fields
            .iter()
            .chain(self.column_fields.iter())
            .cloned()
            .collect()
    }

    /// Measure names in request order.
    pub fn measure_names(&self) -> Vec<String> {
        self.value_fields.iter().map(|vf| vf.name.clone()).collect()
    }

    /// A pivot without row dimensions is defined as empty.
    pub fn is_degenerate(&self) -> bool {
        self.row_fields.is_empty()
    }
}
