//! Configuration domain

mod app_config;
mod database;

pub use app_config::{
    AppConfig, ComskipOutput, ToolsConfig, DEFAULT_COMSKIP_INI, DEFAULT_LOG_FILE,
};
pub use database::{DatabaseConfig, DEFAULT_DB_PORT};
