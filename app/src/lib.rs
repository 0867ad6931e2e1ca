//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point for the election pivot application.
// CONTEXT: Wires configuration, logging and the fact-table catalog to the
// pivot engine. HTTP routing and templates live outside this crate and call
// the command functions.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use commands::{get_pivot_page, remaining_dimensions, update_pivot_table, PivotRequest, PivotResponse};
pub use config::{AppConfig, LoggingConfig, DEFAULT_TABLE};
pub use error::AppError;
pub use logging::{get_log_path, init_logging, next_seq};
pub use state::AppState;

/// Loads the config file, installs logging and builds the application state.
pub fn create_app_state(config_path: impl AsRef<std::path::Path>) -> Result<AppState, AppError> {
    let config = AppConfig::load(config_path)?;
    init_logging(&config.logging)?;
    crate::log_info!("SYS", "Creating AppState");
    AppState::from_config(config)
}
