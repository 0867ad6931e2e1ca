//! FILENAME: core/fact-table/src/query.rs
//! Grouped aggregation over a fact table.
//!
//! Mirrors the query the pivot engine expects from a database:
//! dimension values are normalized (null or empty text becomes `"OTHER"`),
//! rows are grouped by the dimension tuple, each measure is aggregated with
//! nulls skipped, and groups come back sorted ascending by the tuple.

use std::collections::BTreeMap;

use log::debug;
use pivot_engine::{
    format_number, AggregationType, ColumnInfo, DataSource, NumberFormat, SchemaSource,
    SourceError, SourceRecord, ValueField, OTHER_LABEL,
};

use crate::table::{Catalog, FactTable, FactValue};

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Running state for one measure within one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub sum: f64,
    /// Non-null values seen.
    pub count: u64,
    /// Numeric values seen.
    pub count_numbers: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator::default()
    }

    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.count_numbers += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Adds a non-null, non-numeric value (only counted).
    pub fn add_non_number(&mut self) {
        self.count += 1;
    }

    pub fn add(&mut self, value: &FactValue) {
        match value {
            FactValue::Null => {}
            FactValue::Number(n) => self.add_number(*n),
            FactValue::Text(_) => self.add_non_number(),
        }
    }

    /// Final aggregate; `None` when no numeric value was seen.
    pub fn compute(&self, aggregation: AggregationType) -> Option<f64> {
        if aggregation == AggregationType::Count {
            return Some(self.count as f64);
        }
        if self.count_numbers == 0 {
            return None;
        }
        match aggregation {
            AggregationType::Sum => Some(self.sum),
            AggregationType::Average => Some(self.sum / self.count_numbers as f64),
            AggregationType::Min => self.min,
            AggregationType::Max => self.max,
            AggregationType::Count => Some(self.count as f64),
        }
    }
}

// ============================================================================
// QUERY
// ============================================================================

/// Text form of a dimension value, with empties mapped to `"OTHER"`.
fn dimension_text(value: &FactValue) -> String {
    match value {
        FactValue::Null => OTHER_LABEL.to_string(),
        FactValue::Text(s) if s.is_empty() => OTHER_LABEL.to_string(),
        FactValue::Text(s) => s.clone(),
        FactValue::Number(n) => {
            format_number(*n, &NumberFormat::General).unwrap_or_else(|_| OTHER_LABEL.to_string())
        }
    }
}

/// Groups `table` by `dimensions` and aggregates `measures` per group.
pub fn aggregate_table(
    table: &FactTable,
    dimensions: &[String],
    measures: &[ValueField],
) -> Result<Vec<SourceRecord>, SourceError> {
    // Tables built outside the catalog may carry ragged rows.
    table
        .validate()
        .map_err(|e| SourceError::Backend(e.to_string()))?;

    let dim_indices = dimensions
        .iter()
        .map(|name| table.column(name).map(|(i, _)| i))
        .collect::<Result<Vec<_>, _>>()?;

    let measure_indices = measures
        .iter()
        .map(|vf| -> Result<usize, SourceError> {
            let (i, info) = table.column(&vf.name)?;
            if vf.aggregation != AggregationType::Count && !info.column_type.is_numeric() {
                return Err(SourceError::NotNumeric {
                    table: table.name.clone(),
                    column: vf.name.clone(),
                });
            }
            Ok(i)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups: BTreeMap<Vec<String>, Vec<Accumulator>> = BTreeMap::new();
    for row in &table.rows {
        let key: Vec<String> = dim_indices.iter().map(|&i| dimension_text(&row[i])).collect();
        let accumulators = groups
            .entry(key)
            .or_insert_with(|| vec![Accumulator::new(); measure_indices.len()]);
        for (acc, &i) in accumulators.iter_mut().zip(&measure_indices) {
            acc.add(&row[i]);
        }
    }

    debug!(
        target: "fact_table",
        "aggregated table={} rows={} groups={} dims={:?}",
        table.name,
        table.rows.len(),
        groups.len(),
        dimensions
    );

    Ok(groups
        .into_iter()
        .map(|(dims, accumulators)| SourceRecord {
            dimensions: dims,
            measures: accumulators
                .iter()
                .zip(measures)
                .map(|(acc, vf)| acc.compute(vf.aggregation))
                .collect(),
        })
        .collect())
}

impl DataSource for Catalog {
    fn query(
        &self,
        table: &str,
        dimensions: &[String],
        measures: &[ValueField],
    ) -> Result<Vec<SourceRecord>, SourceError> {
        aggregate_table(self.table(table)?, dimensions, measures)
    }
}

impl SchemaSource for Catalog {
    fn table_info(&self, table: &str) -> Result<Vec<ColumnInfo>, SourceError> {
        Ok(self.table(table)?.columns.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_engine::ColumnType;

    fn results_table() -> FactTable {
        let mut table = FactTable::new(
            "results",
            vec![
                ColumnInfo::new("state", ColumnType::Text),
                ColumnInfo::new("party", ColumnType::Text),
                ColumnInfo::new("votes", ColumnType::Integer),
            ],
        );
        let rows: Vec<Vec<FactValue>> = vec![
            vec!["TX".into(), "REPUBLICAN".into(), 50i64.into()],
            vec!["CA".into(), "DEMOCRAT".into(), 30i64.into()],
            vec!["CA".into(), "".into(), 2i64.into()],
            vec!["CA".into(), "DEMOCRAT".into(), 12i64.into()],
            vec!["CA".into(), FactValue::Null, 1i64.into()],
            vec!["TX".into(), "REPUBLICAN".into(), FactValue::Null],
        ];
        for row in rows {
            table.push_row(row).unwrap();
        }
        table
    }

    fn dims(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_groups_sorted_and_normalized() {
        let records = aggregate_table(
            &results_table(),
            &dims(&["state", "party"]),
            &[ValueField::sum("votes")],
        )
        .unwrap();

        assert_eq!(
            records,
            vec![
                SourceRecord::with_values(["CA", "DEMOCRAT"], [42.0]),
                SourceRecord::with_values(["CA", "OTHER"], [3.0]),
                SourceRecord::with_values(["TX", "REPUBLICAN"], [50.0]),
            ]
        );
    }

    #[test]
    fn test_no_dimensions_single_group() {
        let records = aggregate_table(&results_table(), &[], &[ValueField::sum("votes")]).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].dimensions.is_empty());
        assert_eq!(records[0].measure(0), Some(95.0));
    }

    #[test]
    fn test_aggregation_variants() {
        let measures = vec![
            ValueField::new("votes", AggregationType::Count),
            ValueField::new("votes", AggregationType::Average),
            ValueField::new("votes", AggregationType::Min),
            ValueField::new("votes", AggregationType::Max),
        ];
        let records = aggregate_table(&results_table(), &dims(&["state"]), &measures).unwrap();

        // TX has one null vote, skipped by every aggregate.
        assert_eq!(records[1].measures, vec![Some(1.0), Some(50.0), Some(50.0), Some(50.0)]);
        assert_eq!(records[0].measures[0], Some(4.0));
        assert_eq!(records[0].measures[1], Some(11.25));
    }

    #[test]
    fn test_all_null_group_has_no_sum() {
        let mut acc = Accumulator::new();
        acc.add(&FactValue::Null);

        assert_eq!(acc.compute(AggregationType::Sum), None);
        assert_eq!(acc.compute(AggregationType::Count), Some(0.0));
    }

    #[test]
    fn test_numeric_dimension_values_render_as_text() {
        assert_eq!(dimension_text(&FactValue::Number(12.0)), "12");
        assert_eq!(dimension_text(&FactValue::Null), "OTHER");
    }

    #[test]
    fn test_rejects_text_measure() {
        let err = aggregate_table(&results_table(), &dims(&["state"]), &[ValueField::sum("party")])
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::NotNumeric {
                table: "results".to_string(),
                column: "party".to_string(),
            }
        );

        // Counting a text column is fine.
        let records = aggregate_table(
            &results_table(),
            &dims(&["state"]),
            &[ValueField::new("party", AggregationType::Count)],
        )
        .unwrap();
        assert_eq!(records[0].measure(0), Some(3.0));
    }

    #[test]
    fn test_ragged_rows_are_an_error() {
        let table: FactTable = serde_json::from_str(
            r#"{
                "name": "results",
                "columns": [
                    { "name": "state", "type": "Text" },
                    { "name": "votes", "type": "Integer" }
                ],
                "rows": [["CA", 10], ["TX"]]
            }"#,
        )
        .unwrap();

        let err = aggregate_table(&table, &dims(&["state"]), &[ValueField::sum("votes")]).unwrap_err();

        match err {
            SourceError::Backend(message) => assert!(message.contains("Row 1"), "{}", message),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_catalog_as_sources() {
        let mut catalog = Catalog::new();
        catalog.add_table(results_table()).unwrap();

        let records = catalog
            .query("results", &dims(&["party"]), &[ValueField::sum("votes")])
            .unwrap();
        assert_eq!(records.len(), 3);

        let info = catalog.table_info("results").unwrap();
        assert_eq!(info.len(), 3);
        assert!(matches!(
            catalog.table_info("nope"),
            Err(SourceError::UnknownTable(_))
        ));
    }
}
