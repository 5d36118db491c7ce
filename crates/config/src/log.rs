// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log Level
    ///
    /// Env: SAS_LOG_LEVEL
    /// Valid values: trace, debug, info, http, warn, error
    /// Default: info
    pub level: String,

    /// Output logs in JSON format
    ///
    /// Env: SAS_LOG_JSON
    /// Default: false
    pub json: bool,

    /// Strip ANSI color codes from logs
    ///
    /// Env: SAS_LOG_STRIP_ANSI
    /// Default: false
    pub strip_ansi: bool,

    /// Also write logs to a size-rotated file
    ///
    /// Env: SAS_LOG_WRITE
    /// Default: false
    pub write: bool,

    /// Directory for the log file
    ///
    /// Env: SAS_LOG_WRITE_PATH
    /// Default: ./logs
    pub write_path: String,

    /// Size in bytes at which the log file is rotated
    ///
    /// Env: SAS_LOG_WRITE_MAX_FILE_SIZE
    /// Default: 5242880
    pub write_max_file_size: u64,

    /// Number of log files kept, the current one included
    ///
    /// Env: SAS_LOG_WRITE_MAX_FILES
    /// Default: 5
    pub write_max_files: usize,

    /// Loki push endpoint
    ///
    /// Env: SAS_LOG_LOKI_URL
    /// Default: unset
    pub loki_url: Option<String>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_write_path() -> String {
    "./logs".to_string()
}

impl LogConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "http", "warn", "error"];

        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::ValidateError(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            )));
        }

        if self.write {
            if self.write_path.is_empty() {
                return Err(ConfigError::ValidateError(
                    "Log write path cannot be empty when file logging is enabled".to_string(),
                ));
            }
            if self.write_max_file_size == 0 {
                return Err(ConfigError::ValidateError(
                    "Log max file size must be greater than 0".to_string(),
                ));
            }
            if self.write_max_files == 0 {
                return Err(ConfigError::ValidateError(
                    "Log max files must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(url) = &self.loki_url {
            url::Url::parse(url).map_err(|e| {
                ConfigError::ValidateError(format!("Invalid Loki URL '{}': {}", url, e))
            })?;
        }

        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            strip_ansi: false,
            write: false,
            write_path: default_write_path(),
            write_max_file_size: 5_242_880,
            write_max_files: 5,
            loki_url: None,
        }
    }
}
