//! FILENAME: core/pivot-engine/tests/test_reshape_properties.rs
//! Structural properties of the reshape over generated sorted datasets.

use pivot_engine::{
    build_matrix, compress_labels, reshape_records, AxisKey, NumberFormat, PivotDefinition,
    SourceRecord, ValueField, DEFAULT_AXIS_NAME,
};

// ============================================================================
// FIXTURES
// ============================================================================

/// Deterministic sorted dataset over (state, district, party) where only some
/// party/district combinations carry votes.
fn sparse_dataset(states: usize, districts: usize, measures: usize) -> Vec<SourceRecord> {
    let parties = ["DEMOCRAT", "LIBERTARIAN", "OTHER", "REPUBLICAN"];
    let mut records = Vec::new();
    for s in 0..states {
        for d in 0..districts {
            for (p, party) in parties.iter().enumerate() {
                if (s * 7 + d * 3 + p) % 4 == 1 {
                    continue;
                }
                let values: Vec<f64> = (0..measures)
                    .map(|m| ((s + 1) * 100 + d * 10 + p + m) as f64)
                    .collect();
                records.push(SourceRecord::with_values(
                    [format!("S{}", s), format!("D{}", d), party.to_string()],
                    values,
                ));
            }
        }
    }
    records
}

fn measure_names(count: usize) -> Vec<String> {
    (0..count).map(|m| format!("M{}", m)).collect()
}

fn row_key(record: &SourceRecord, row_dims: usize) -> AxisKey {
    AxisKey::from_slice(&record.dimensions[..row_dims])
}

// ============================================================================
// MATRIX PROPERTIES
// ============================================================================

#[test]
fn test_grid_is_rectangular() {
    for measures in 1..=3 {
        let records = sparse_dataset(6, 5, measures);
        let matrix = build_matrix(&records, 2, &measure_names(measures));

        assert_eq!(matrix.grid().len(), matrix.row_count());
        for row in matrix.grid() {
            assert_eq!(row.len(), matrix.col_count());
        }
    }
}

#[test]
fn test_row_keys_follow_first_occurrence() {
    let records = sparse_dataset(5, 4, 1);
    let matrix = build_matrix(&records, 2, &measure_names(1));

    let mut expected: Vec<AxisKey> = Vec::new();
    for record in &records {
        let key = row_key(record, 2);
        if !expected.contains(&key) {
            expected.push(key);
        }
    }
    assert_eq!(matrix.row_keys(), expected.as_slice());
}

#[test]
fn test_column_keys_strictly_ascending() {
    let records = sparse_dataset(5, 4, 2);
    let matrix = build_matrix(&records, 1, &measure_names(2));

    assert!(matrix.col_keys().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_every_value_lands_at_its_keys() {
    let measures = measure_names(2);
    let records = sparse_dataset(4, 3, 2);
    let matrix = build_matrix(&records, 2, &measures);

    let mut filled = 0;
    for record in &records {
        for (m, measure) in measures.iter().enumerate() {
            let col_key = AxisKey::from_slice(&record.dimensions[2..]).prefixed(measure);
            let (row, col) = matrix.position_of(&row_key(record, 2), &col_key).unwrap();
            assert_eq!(matrix.value_at(row, col), record.measure(m));
            filled += 1;
        }
    }

    let non_empty = matrix.grid().iter().flatten().filter(|c| c.is_some()).count();
    assert_eq!(non_empty, filled);
}

// ============================================================================
// LABEL PROPERTIES
// ============================================================================

#[test]
fn test_spans_cover_each_axis() {
    let records = sparse_dataset(6, 5, 1);
    let matrix = build_matrix(&records, 2, &measure_names(1));
    let row_names = vec!["state".to_string(), "district".to_string()];

    let row_labels = compress_labels(&row_names, matrix.row_keys(), DEFAULT_AXIS_NAME);
    for (_, run) in row_labels.iter() {
        assert_eq!(run.total_span(), matrix.row_count());
        assert_eq!(run.len(), matrix.row_count());
    }

    let col_labels = compress_labels(&["party".to_string()], matrix.col_keys(), DEFAULT_AXIS_NAME);
    for (_, run) in col_labels.iter() {
        assert_eq!(run.total_span(), matrix.col_count());
    }
}

#[test]
fn test_cumulative_spans_reconstruct_positions() {
    let records = sparse_dataset(4, 3, 1);
    let matrix = build_matrix(&records, 2, &measure_names(1));
    let row_names = vec!["state".to_string(), "district".to_string()];
    let labels = compress_labels(&row_names, matrix.row_keys(), DEFAULT_AXIS_NAME);

    // Walking the outer level's heads and adding spans reaches each group's
    // first row in the grid.
    let states = labels.get("State").unwrap();
    let mut offset = 0;
    for head in states.heads() {
        let key = &matrix.row_keys()[offset];
        assert_eq!(head.value, pivot_engine::title_case(key.get(0).unwrap()));
        for position in offset..offset + head.span {
            assert_eq!(matrix.row_keys()[position].get(0), key.get(0));
        }
        offset += head.span;
    }
    assert_eq!(offset, matrix.row_count());
}

// ============================================================================
// PAYLOAD
// ============================================================================

#[test]
fn test_payload_json_shape() {
    let records = vec![
        SourceRecord::with_values(["AK", "REPUBLICAN"], [5.0]),
        SourceRecord::with_values(["AL", "DEMOCRAT"], [10.0]),
        SourceRecord::with_values(["AL", "REPUBLICAN"], [20.0]),
    ];
    let definition = PivotDefinition::new("house_precinct_general")
        .with_rows(["state"])
        .with_columns(["party"])
        .with_values(vec![ValueField::sum("Votes")])
        .with_format(NumberFormat::integer());

    let payload = reshape_records(&records, &definition).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "col_labels": {
                "Party": [
                    { "span": 1, "value": "Democrat" },
                    { "span": 1, "value": "Republican" }
                ]
            },
            "row_labels": {
                "State": [
                    { "span": 1, "value": "Ak" },
                    { "span": 1, "value": "Al" }
                ]
            },
            "values": [
                [ { "raw": null, "formatted": "" }, { "raw": 5.0, "formatted": "5" } ],
                [ { "raw": 10.0, "formatted": "10" }, { "raw": 20.0, "formatted": "20" } ]
            ]
        })
    );
}
