//! FILENAME: core/fact-table/src/table.rs
//! Fact tables and the catalog that holds them.

use std::path::Path;

use log::info;
use pivot_engine::{ColumnInfo, ColumnType, SourceError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::FactTableError;

/// A single stored value. Deserializes from plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    Null,
    Number(f64),
    Text(String),
}

impl From<&str> for FactValue {
    fn from(value: &str) -> Self {
        FactValue::Text(value.to_string())
    }
}

impl From<f64> for FactValue {
    fn from(value: f64) -> Self {
        FactValue::Number(value)
    }
}

impl From<i64> for FactValue {
    fn from(value: i64) -> Self {
        FactValue::Number(value as f64)
    }
}

impl<T: Into<FactValue>> From<Option<T>> for FactValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FactValue::Null, Into::into)
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// A named table of rows with a fixed column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactTable {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub rows: Vec<Vec<FactValue>>,
}

impl FactTable {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        FactTable {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, checking it has one value per column.
    pub fn push_row(&mut self, row: Vec<FactValue>) -> Result<(), FactTableError> {
        if row.len() != self.columns.len() {
            return Err(FactTableError::RowArity {
                table: self.name.clone(),
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Checks every stored row against the column list.
    pub fn validate(&self) -> Result<(), FactTableError> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(FactTableError::RowArity {
                    table: self.name.clone(),
                    row: i,
                    expected: self.columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(())
    }

    pub fn column(&self, name: &str) -> Result<(usize, &ColumnInfo), SourceError> {
        self.columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.name == name)
            .ok_or_else(|| SourceError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Names of text-typed columns, in table order.
    pub fn text_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.column_type == ColumnType::Text)
            .map(|c| c.name.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Deserialize)]
struct CatalogFile {
    tables: Vec<FactTable>,
}

/// All tables available to the application, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: FxHashMap<String, FactTable>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn add_table(&mut self, table: FactTable) -> Result<(), FactTableError> {
        table.validate()?;
        if self.tables.contains_key(&table.name) {
            return Err(FactTableError::DuplicateTable(table.name));
        }
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    pub fn table(&self, name: &str) -> Result<&FactTable, SourceError> {
        self.tables
            .get(name)
            .ok_or_else(|| SourceError::UnknownTable(name.to_string()))
    }

    /// Table names, sorted.
    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parses a catalog from `{ "tables": [ { "name", "columns", "rows" } ] }`.
    pub fn from_json(json: &str) -> Result<Self, FactTableError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut catalog = Catalog::new();
        for table in file.tables {
            catalog.add_table(table)?;
        }
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, FactTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Catalog::from_json(&json)?;
        info!(
            target: "fact_table",
            "loaded catalog from {:?} tables={:?}",
            path,
            catalog.table_names()
        );
        Ok(catalog)
    }
}
