//! FILENAME: core/pivot-engine/src/labels.rs
//! Label Compressor - turns an axis's key sequence into nested header spans.
//!
//! For each dimension depth `d` the keys are scanned in order while tracking
//! the current run's prefix `key[0..=d]`. Only adjacent equal prefixes merge;
//! the axis is already sorted, so no regrouping happens here.

use crate::definition::TOTAL_LABEL;
use crate::key::AxisKey;
use crate::view::{AxisLabels, LabelRun};

/// Title-cases a label for display: the first letter of every run of letters
/// is upper-cased, the rest lower-cased. Non-letters separate words.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Compresses one depth of the axis into a run-length label list.
fn compress_depth(keys: &[AxisKey], depth: usize) -> LabelRun {
    let mut run = LabelRun::new();
    let mut run_start = 0;

    for i in 1..=keys.len() {
        let boundary = i == keys.len() || keys[i].prefix(depth) != keys[run_start].prefix(depth);
        if boundary {
            // Keys shorter than the depth (e.g. the empty single-measure
            // column key) are labelled as the axis total.
            let label = keys[run_start].get(depth).unwrap_or(TOTAL_LABEL);
            run.push_run(i - run_start, title_case(label));
            run_start = i;
        }
    }

    run
}

/// Compresses an axis into labels for every named dimension.
///
/// An empty `keys` slice is treated as the single key `("Total",)` and an
/// empty `dimension_names` slice as the single dimension `placeholder_name`.
/// Output names are title-cased and kept unique within the axis; ordering and
/// grouping always use the raw key strings.
pub fn compress_labels(dimension_names: &[String], keys: &[AxisKey], placeholder_name: &str) -> AxisLabels {
    let total_keys = [AxisKey::total()];
    let keys: &[AxisKey] = if keys.is_empty() { &total_keys } else { keys };

    let placeholder_names = [placeholder_name.to_string()];
    let names: &[String] = if dimension_names.is_empty() {
        &placeholder_names
    } else {
        dimension_names
    };

    let mut labels = AxisLabels::new();
    for (depth, name) in names.iter().enumerate() {
        let display = unique_name(&labels, title_case(name));
        labels.push(display, compress_depth(keys, depth));
    }
    labels
}

/// `base`, or `base` with the first free numeric suffix ("Vote 2") when an
/// earlier level of the axis already uses that display name.
fn unique_name(labels: &AxisLabels, base: String) -> String {
    if labels.get(&base).is_none() {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{} {}", base, n);
        if labels.get(&candidate).is_none() {
            return candidate;
        }
        n += 1;
    }
}
