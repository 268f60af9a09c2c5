//! MythTV `config.xml` reader for database connection settings

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::config::{DatabaseConfig, DEFAULT_DB_PORT};
use crate::domain::error::ConfigError;

/// Environment variable naming MythTV's config directory
pub const CONFDIR_ENV: &str = "MYTHCONFDIR";

const CONFIG_FILE: &str = "config.xml";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USER: &str = "mythtv";
const DEFAULT_DATABASE: &str = "mythconverg";

/// Finds and reads the first MythTV `config.xml` on the search path
#[derive(Debug, Clone)]
pub struct MythConfigResolver {
    candidates: Vec<PathBuf>,
}

impl MythConfigResolver {
    /// Search `$MYTHCONFDIR`, `~/.mythtv`, the mythtv user's home, then `/etc/mythtv`
    pub fn new() -> Self {
        let mut candidates = Vec::new();
        if let Some(dir) = std::env::var_os(CONFDIR_ENV).filter(|d| !d.is_empty()) {
            candidates.push(PathBuf::from(dir).join(CONFIG_FILE));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".mythtv").join(CONFIG_FILE));
        }
        candidates.push(PathBuf::from("/home/mythtv/.mythtv").join(CONFIG_FILE));
        candidates.push(PathBuf::from("/etc/mythtv").join(CONFIG_FILE));
        Self { candidates }
    }

    /// Use exactly one file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![path.into()],
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that exists, if any
    pub fn find(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.is_file())
    }

    /// Read connection settings from the first config found
    pub async fn resolve(&self) -> Result<DatabaseConfig, ConfigError> {
        let Some(path) = self.find() else {
            return Err(ConfigError::NotFound {
                searched: self
                    .candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        };
        debug!(path = %path.display(), "reading MythTV config");

        let xml = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        parse_config_xml(&xml)
    }
}

impl Default for MythConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the `<Database>` section of a MythTV config.
///
/// ```xml
/// <Configuration>
///   <Database>
///     <Host>localhost</Host>
///     <UserName>mythtv</UserName>
///     <Password>mythtv</Password>
///     <DatabaseName>mythconverg</DatabaseName>
///     <Port>3306</Port>
///   </Database>
/// </Configuration>
/// ```
///
/// Missing elements fall back to MythTV's defaults.
pub fn parse_config_xml(xml: &str) -> Result<DatabaseConfig, ConfigError> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| ConfigError::ParseError(format!("XML parse error: {}", e)))?;

    let database = doc
        .root_element()
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "Database")
        .ok_or_else(|| ConfigError::ParseError("no <Database> element".to_string()))?;

    let mut config = DatabaseConfig {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_DB_PORT,
        username: DEFAULT_USER.to_string(),
        password: String::new(),
        database: DEFAULT_DATABASE.to_string(),
    };

    for child in database.children().filter(|n| n.is_element()) {
        let text = child.text().map(str::trim).unwrap_or_default();
        match child.tag_name().name() {
            "Host" if !text.is_empty() => config.host = text.to_string(),
            "UserName" if !text.is_empty() => config.username = text.to_string(),
            "Password" => config.password = text.to_string(),
            "DatabaseName" if !text.is_empty() => config.database = text.to_string(),
            "Port" if !text.is_empty() => {
                config.port = text.parse().map_err(|_| ConfigError::ValidationError {
                    key: "Database.Port".to_string(),
                    message: format!("not a port number: {}", text),
                })?;
            }
            _ => {}
        }
    }

    Ok(config)
}
