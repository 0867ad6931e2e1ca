//! FILENAME: app/src/state.rs
// PURPOSE: Shared application state.
// CONTEXT: The catalog is read-only after load, so requests share it through
// an Arc without locking. Each pivot request builds its own payload.

use std::sync::Arc;

use fact_table::Catalog;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::log_info;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        AppState {
            config,
            catalog: Arc::new(catalog),
        }
    }

    /// Loads the catalog named by `config.data_path`.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let data_path = config.data_path.as_ref().ok_or(AppError::MissingDataPath)?;
        let catalog = Catalog::load(data_path)?;
        // Fail at startup rather than on the first request.
        catalog.table(&config.table)?;
        log_info!("APP", "state ready table={} data={:?}", config.table, data_path);
        Ok(AppState::new(config, catalog))
    }
}
