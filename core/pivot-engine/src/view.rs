//! FILENAME: core/pivot-engine/src/view.rs
//! Pivot View - Renderable output for the presentation layer.
//!
//! A renderer walks each `LabelRun`, emits `rowspan`/`colspan` from the head
//! entries and skips the `None` placeholders that follow them.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::matrix::Cell;

// ============================================================================
// HEADER LABELS
// ============================================================================

/// Head entry of a run of equal labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelSpan {
    /// Number of consecutive axis positions this label covers.
    pub span: usize,
    /// Title-cased display label.
    pub value: String,
}

/// Run-length encoded labels for one dimension depth.
///
/// Entries align 1:1 with the axis keys: a run of length `k` is one
/// `Some(LabelSpan { span: k, .. })` followed by `k - 1` `None`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelRun {
    entries: Vec<Option<LabelSpan>>,
}

impl LabelRun {
    pub fn new() -> Self {
        LabelRun::default()
    }

    /// Appends a run covering `span` positions.
    pub fn push_run(&mut self, span: usize, value: String) {
        if span == 0 {
            return;
        }
        self.entries.push(Some(LabelSpan { span, value }));
        self.entries.extend(std::iter::repeat(None).take(span - 1));
    }

    pub fn entries(&self) -> &[Option<LabelSpan>] {
        &self.entries
    }

    /// Number of axis positions covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the head entries only.
    pub fn heads(&self) -> impl Iterator<Item = &LabelSpan> {
        self.entries.iter().flatten()
    }

    /// Sum of every head's span.
    pub fn total_span(&self) -> usize {
        self.heads().map(|h| h.span).sum()
    }

    /// The head entry whose run covers `position`.
    pub fn head_covering(&self, position: usize) -> Option<&LabelSpan> {
        if position >= self.entries.len() {
            return None;
        }
        self.entries[..=position].iter().rev().flatten().next()
    }
}

/// Labels for every dimension of one axis, in dimension order.
///
/// Serializes as a JSON object keyed by the display name of each dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisLabels {
    dimensions: Vec<(String, LabelRun)>,
}

impl AxisLabels {
    pub fn new() -> Self {
        AxisLabels::default()
    }

    pub fn push(&mut self, name: String, run: LabelRun) {
        self.dimensions.push((name, run));
    }

    pub fn get(&self, name: &str) -> Option<&LabelRun> {
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, run)| run)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dimensions.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelRun)> {
        self.dimensions.iter().map(|(n, run)| (n.as_str(), run))
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

impl Serialize for AxisLabels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.dimensions.len()))?;
        for (name, run) in &self.dimensions {
            map.serialize_entry(name, run)?;
        }
        map.end()
    }
}

// ============================================================================
// VALUE CELLS
// ============================================================================

/// A single grid cell carrying both the raw and the formatted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCell {
    pub raw: Cell,
    /// Empty string when `raw` is `None`.
    pub formatted: String,
}

// ============================================================================
// PAYLOAD
// ============================================================================

/// Everything a template needs to render the nested cross-tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotPayload {
    pub col_labels: AxisLabels,
    pub row_labels: AxisLabels,
    pub values: Vec<Vec<ValueCell>>,
}

impl PivotPayload {
    /// The payload of a pivot with no row dimensions.
    pub fn empty() -> Self {
        PivotPayload::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn col_count(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }
}
