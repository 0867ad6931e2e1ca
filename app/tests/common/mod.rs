//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the application integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use app_lib::{AppConfig, AppState};
use fact_table::{Catalog, FactTable, FactValue};
use pivot_engine::{ColumnInfo, ColumnType};
use tempfile::TempDir;

/// Election results fixture data.
pub struct ElectionFixture;

impl ElectionFixture {
    pub const TABLE: &'static str = "house_precinct_general";

    pub fn columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo::new("state", ColumnType::Text),
            ColumnInfo::new("district", ColumnType::Text),
            ColumnInfo::new("party_simplified", ColumnType::Text),
            ColumnInfo::new("mode", ColumnType::Text),
            ColumnInfo::new("year", ColumnType::Integer),
            ColumnInfo::new("Votes", ColumnType::Integer),
        ]
    }

    /// (state, district, party, mode, votes)
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, &'static str, i64)> {
        vec![
            ("WYOMING", "000", "REPUBLICAN", "ELECTION DAY", 500),
            ("ALASKA", "000", "DEMOCRAT", "ELECTION DAY", 40),
            ("ALASKA", "000", "REPUBLICAN", "ABSENTEE", 60),
            ("ALASKA", "000", "", "ELECTION DAY", 5),
            ("DELAWARE", "000", "DEMOCRAT", "", 200),
            ("DELAWARE", "000", "REPUBLICAN", "ELECTION DAY", 150),
            ("ALASKA", "000", "DEMOCRAT", "ABSENTEE", 25),
            ("WYOMING", "000", "LIBERTARIAN", "ABSENTEE", 12),
        ]
    }

    pub fn table() -> FactTable {
        let mut table = FactTable::new(Self::TABLE, Self::columns());
        for (state, district, party, mode, votes) in Self::data() {
            let row: Vec<FactValue> = vec![
                state.into(),
                district.into(),
                party.into(),
                mode.into(),
                2022i64.into(),
                votes.into(),
            ];
            table.push_row(row).expect("fixture row");
        }
        table
    }

    pub fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_table(Self::table()).expect("fixture table");
        catalog
    }

    /// The catalog in its on-disk JSON form.
    pub fn catalog_json() -> String {
        serde_json::json!({ "tables": [Self::table()] }).to_string()
    }
}

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Harness over the election fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        TestHarness {
            state: AppState::new(config, ElectionFixture::catalog()),
        }
    }
}

/// A config file and data file written to a temporary directory.
pub struct ConfigDir {
    pub dir: TempDir,
    pub config_path: PathBuf,
}

impl ConfigDir {
    pub fn new(config_json: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("elections.json"), ElectionFixture::catalog_json())
            .expect("write data");
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, config_json).expect("write config");
        ConfigDir { dir, config_path }
    }
}
