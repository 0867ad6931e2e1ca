//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - The orchestrator that turns a definition into a payload.
//!
//! Algorithm:
//! 1. Short-circuit to an empty payload when no row dimensions are placed
//! 2. Ask the data source for rows + columns grouped, aggregated and sorted
//! 3. Reshape the records into a sparse matrix
//! 4. Compress the row and column keys into header spans
//! 5. Format every cell, keeping the raw value next to its display string

use log::{debug, info};

use crate::definition::{PivotDefinition, ValueField};
use crate::error::PivotError;
use crate::format::{format_cell, NumberFormat};
use crate::labels::compress_labels;
use crate::matrix::{build_matrix, Cell};
use crate::source::{DataSource, SourceRecord};
use crate::view::{PivotPayload, ValueCell};

/// Dimension names for the column axis.
///
/// With several measures every column key starts with the measure name, so
/// the axis gains a leading level named after the placeholder axis.
fn column_axis_names(definition: &PivotDefinition) -> Vec<String> {
    if definition.value_fields.len() > 1 && !definition.column_fields.is_empty() {
        let mut names = Vec::with_capacity(definition.column_fields.len() + 1);
        names.push(definition.placeholder_axis_name.clone());
        names.extend(definition.column_fields.iter().cloned());
        names
    } else {
        definition.column_fields.clone()
    }
}

/// Formats the whole grid. The first failing cell aborts with its position.
fn format_grid(grid: &[Vec<Cell>], format: &NumberFormat) -> Result<Vec<Vec<ValueCell>>, PivotError> {
    let mut values = Vec::with_capacity(grid.len());
    for (row, cells) in grid.iter().enumerate() {
        let mut formatted_row = Vec::with_capacity(cells.len());
        for (col, &raw) in cells.iter().enumerate() {
            let formatted = format_cell(raw, format)
                .map_err(|source| PivotError::Format { row, col, source })?;
            formatted_row.push(ValueCell { raw, formatted });
        }
        values.push(formatted_row);
    }
    Ok(values)
}

/// Reshapes already-aggregated, sorted records into a payload.
///
/// `records` must be ordered by the row dimensions, then the column
/// dimensions, with dimension values positional as
/// [`PivotDefinition::query_dimensions`] and measures positional as
/// `value_fields`.
pub fn reshape_records(records: &[SourceRecord], definition: &PivotDefinition) -> Result<PivotPayload, PivotError> {
    let measures = definition.measure_names();
    let matrix = build_matrix(records, definition.row_fields.len(), &measures);

    let row_labels = compress_labels(
        &definition.row_fields,
        matrix.row_keys(),
        &definition.placeholder_axis_name,
    );
    let col_labels = compress_labels(
        &column_axis_names(definition),
        matrix.col_keys(),
        &definition.placeholder_axis_name,
    );
    let values = format_grid(matrix.grid(), &definition.number_format)?;

    debug!(
        target: "pivot",
        "reshaped rows={} cols={} row_levels={} col_levels={}",
        matrix.row_count(),
        matrix.col_count(),
        row_labels.len(),
        col_labels.len()
    );

    Ok(PivotPayload {
        col_labels,
        row_labels,
        values,
    })
}

/// Calculates a pivot payload from a data source.
/// This is the main entry point for the calculation engine.
pub fn calculate_pivot<S>(source: &S, definition: &PivotDefinition) -> Result<PivotPayload, PivotError>
where
    S: DataSource + ?Sized,
{
    if definition.is_degenerate() {
        debug!(target: "pivot", "no row fields for table={}, returning empty payload", definition.table);
        return Ok(PivotPayload::empty());
    }

    let dimensions = definition.query_dimensions();
    let records = source.query(&definition.table, &dimensions, &definition.value_fields)?;

    let measure_labels: Vec<String> = definition.value_fields.iter().map(ValueField::label).collect();
    info!(
        target: "pivot",
        "calculate_pivot table={} rows={:?} cols={:?} measures={:?} records={}",
        definition.table,
        definition.row_fields,
        definition.column_fields,
        measure_labels,
        records.len()
    );

    reshape_records(&records, definition)
}
