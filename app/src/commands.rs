//! FILENAME: app/src/commands.rs
//! PURPOSE: Pivot request handling.
//! CONTEXT: The page request and the table-fragment request both pivot the
//! configured table. Every measure is summed and rendered with the configured
//! number format.

use std::collections::BTreeSet;
use std::time::Instant;

use pivot_engine::{
    calculate_pivot, ColumnType, PivotDefinition, PivotPayload, SchemaSource, SourceError,
    ValueField,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::{log_debug, log_info};

// ============================================================================
// REQUEST / RESPONSE TYPES
// ============================================================================

/// Fields the user placed on each area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRequest {
    #[serde(default)]
    pub rows: Vec<String>,
    #[serde(default)]
    pub cols: Vec<String>,
    #[serde(default)]
    pub measures: Vec<String>,
}

/// Everything the page template renders.
#[derive(Debug, Clone, Serialize)]
pub struct PivotResponse {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    pub measures: Vec<String>,
    /// Text fields not yet placed on any area, sorted.
    pub rest: Vec<String>,
    #[serde(flatten)]
    pub payload: PivotPayload,
}

// ============================================================================
// HELPERS
// ============================================================================

/// Text-typed fields of `table` that are not already in use.
pub fn remaining_dimensions<S>(schema: &S, table: &str, request: &PivotRequest) -> Result<Vec<String>, SourceError>
where
    S: SchemaSource + ?Sized,
{
    let used: BTreeSet<&str> = request
        .rows
        .iter()
        .chain(&request.cols)
        .chain(&request.measures)
        .map(String::as_str)
        .collect();

    let rest: BTreeSet<String> = schema
        .table_info(table)?
        .into_iter()
        .filter(|c| c.column_type == ColumnType::Text && !used.contains(c.name.as_str()))
        .map(|c| c.name)
        .collect();

    Ok(rest.into_iter().collect())
}

fn definition_for(state: &AppState, request: &PivotRequest) -> PivotDefinition {
    PivotDefinition::new(state.config.table.clone())
        .with_rows(request.rows.iter().cloned())
        .with_columns(request.cols.iter().cloned())
        .with_values(request.measures.iter().map(ValueField::sum).collect())
        .with_format(state.config.number_format)
}

fn build_response(state: &AppState, request: PivotRequest) -> Result<PivotResponse, AppError> {
    let start = Instant::now();
    let catalog = state.catalog.as_ref();

    let rest = remaining_dimensions(catalog, &state.config.table, &request)?;
    let definition = definition_for(state, &request);
    let payload = calculate_pivot(catalog, &definition)?;

    log_debug!(
        "PIVOT",
        "built response rows={} cols={} rest={} in {:?}",
        payload.row_count(),
        payload.col_count(),
        rest.len(),
        start.elapsed()
    );

    Ok(PivotResponse {
        rows: request.rows,
        cols: request.cols,
        measures: request.measures,
        rest,
        payload,
    })
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Full page request. With no measures selected the configured defaults are
/// used.
pub fn get_pivot_page(state: &AppState, mut request: PivotRequest) -> Result<PivotResponse, String> {
    log_info!(
        "PIVOT",
        "get_pivot_page rows={:?} cols={:?} measures={:?}",
        request.rows,
        request.cols,
        request.measures
    );

    if request.measures.is_empty() {
        request.measures = state.config.default_measures.clone();
    }
    build_response(state, request).map_err(|e| e.to_string())
}

/// Table fragment request. Measures are used exactly as given.
pub fn update_pivot_table(state: &AppState, request: PivotRequest) -> Result<PivotResponse, String> {
    log_info!(
        "PIVOT",
        "update_pivot_table rows={:?} cols={:?} measures={:?}",
        request.rows,
        request.cols,
        request.measures
    );

    build_response(state, request).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_engine::ColumnInfo;

    struct FixedSchema(Vec<ColumnInfo>);

    impl SchemaSource for FixedSchema {
        fn table_info(&self, _table: &str) -> Result<Vec<ColumnInfo>, SourceError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_remaining_dimensions() {
        let schema = FixedSchema(vec![
            ColumnInfo::new("year", ColumnType::Integer),
            ColumnInfo::new("state", ColumnType::Text),
            ColumnInfo::new("party", ColumnType::Text),
            ColumnInfo::new("district", ColumnType::Text),
            ColumnInfo::new("Votes", ColumnType::Integer),
        ]);
        let request = PivotRequest {
            rows: vec!["state".to_string()],
            cols: vec![],
            measures: vec!["Votes".to_string()],
        };

        let rest = remaining_dimensions(&schema, "t", &request).unwrap();

        assert_eq!(rest, vec!["district", "party"]);
    }

    #[test]
    fn test_request_defaults() {
        let request: PivotRequest = serde_json::from_str(r#"{ "rows": ["state"] }"#).unwrap();
        assert!(request.cols.is_empty());
        assert!(request.measures.is_empty());
    }
}
