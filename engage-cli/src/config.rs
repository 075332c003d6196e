//! CLI configuration file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use engage_lib::table::TableConfig;
use log::LevelFilter;
use serde::Deserialize;

use crate::error::CliError;

/// Settings read from `config.json`.
///
/// Every key is optional:
///
/// ```json
/// {
///   "page_size": 25,
///   "rows_per_page": [10, 25, 50],
///   "hide_header": false,
///   "no_row_border": true,
///   "log_level": "debug"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Table defaults.
    #[serde(flatten)]
    pub table: TableConfig,

    /// Level for the log file; `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Loads the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(CliError::io(path, e)),
        };
        serde_json::from_str(&text).map_err(|e| CliError::json(path, e))
    }

    /// The configured log level, or `Info`.
    pub fn level_filter(&self) -> Result<LevelFilter, CliError> {
        match &self.log_level {
            None => Ok(LevelFilter::Info),
            Some(level) => level
                .parse()
                .map_err(|_| CliError::Argument(format!("unknown log level '{}'", level))),
        }
    }
}
