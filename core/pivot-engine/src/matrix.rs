//! FILENAME: core/pivot-engine/src/matrix.rs
//! Sparse Matrix Builder - reshapes sorted long-format records into a
//! rectangular cross-tab.
//!
//! Algorithm (two phases over the records):
//! 1. Collect row keys in first-seen order, the sorted set of column keys,
//!    and one pending placement per (record, measure).
//! 2. Allocate a `rows x cols` grid of "no data" and drop every placement
//!    into its (row, column) slot.
//!
//! Records must be sorted by row tuple, then column tuple. Unsorted input
//! still yields a rectangular grid, but row groups may repeat and a later
//! duplicate (row, column) pair overwrites an earlier one.

use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::key::AxisKey;
use crate::source::SourceRecord;

/// A single matrix slot; `None` is "no data".
pub type Cell = Option<f64>;

/// Row-major cross-tab aligned to a globally sorted column axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseMatrix {
    row_keys: Vec<AxisKey>,
    col_keys: Vec<AxisKey>,
    grid: Vec<Vec<Cell>>,
}

/// A value waiting for its column index to be resolved.
struct Placement {
    row: usize,
    col_key: AxisKey,
    value: Cell,
}

impl SparseMatrix {
    /// Row keys in first-seen order.
    pub fn row_keys(&self) -> &[AxisKey] {
        &self.row_keys
    }

    /// Column keys in strictly ascending order.
    pub fn col_keys(&self) -> &[AxisKey] {
        &self.col_keys
    }

    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn row_count(&self) -> usize {
        self.row_keys.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    pub fn value_at(&self, row: usize, col: usize) -> Cell {
        self.grid.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Locates the grid position of a (row key, column key) pair.
    pub fn position_of(&self, row_key: &AxisKey, col_key: &AxisKey) -> Option<(usize, usize)> {
        let row = self.row_keys.iter().position(|k| k == row_key)?;
        let col = self.col_keys.binary_search(col_key).ok()?;
        Some((row, col))
    }

    pub fn into_parts(self) -> (Vec<AxisKey>, Vec<AxisKey>, Vec<Vec<Cell>>) {
        (self.row_keys, self.col_keys, self.grid)
    }
}

/// Row key of a record: its first `row_dims` dimension values, or the
/// synthetic `("Total",)` key when there are no row dimensions.
fn row_key_of(record: &SourceRecord, row_dims: usize) -> AxisKey {
    if row_dims == 0 {
        return AxisKey::total();
    }
    let end = row_dims.min(record.dimensions.len());
    AxisKey::from_slice(&record.dimensions[..end])
}

/// Column key of a record for one measure. With several measures each one
/// gets its own column family, keyed by the measure name.
fn col_key_of(record: &SourceRecord, row_dims: usize, measure: &str, multi_measure: bool) -> AxisKey {
    let dims = record.dimensions.get(row_dims..).unwrap_or(&[]);
    let key = AxisKey::from_slice(dims);
    if multi_measure {
        key.prefixed(measure)
    } else {
        key
    }
}

/// Builds the sparse matrix for `records`.
///
/// `row_dims` is how many leading dimension values form the row key; the rest
/// form the column key. `measure_names` are positional with each record's
/// measure values.
pub fn build_matrix(records: &[SourceRecord], row_dims: usize, measure_names: &[String]) -> SparseMatrix {
    let multi_measure = measure_names.len() > 1;

    let mut row_keys: Vec<AxisKey> = Vec::new();
    let mut col_set: BTreeSet<AxisKey> = BTreeSet::new();
    let mut placements: Vec<Placement> = Vec::with_capacity(records.len() * measure_names.len());

    for record in records {
        let row_key = row_key_of(record, row_dims);
        if row_keys.last() != Some(&row_key) {
            row_keys.push(row_key);
        }
        let row = row_keys.len() - 1;

        for (m, measure) in measure_names.iter().enumerate() {
            let col_key = col_key_of(record, row_dims, measure, multi_measure);
            if !col_set.contains(&col_key) {
                col_set.insert(col_key.clone());
            }
            placements.push(Placement {
                row,
                col_key,
                value: record.measure(m),
            });
        }
    }

    let col_keys: Vec<AxisKey> = col_set.into_iter().collect();
    let mut grid: Vec<Vec<Cell>> = vec![vec![None; col_keys.len()]; row_keys.len()];

    for placement in placements {
        if let Ok(col) = col_keys.binary_search(&placement.col_key) {
            grid[placement.row][col] = placement.value;
        }
    }

    debug!(
        target: "pivot",
        "built matrix records={} rows={} cols={} measures={}",
        records.len(),
        row_keys.len(),
        col_keys.len(),
        measure_names.len()
    );

    SparseMatrix {
        row_keys,
        col_keys,
        grid,
    }
}
