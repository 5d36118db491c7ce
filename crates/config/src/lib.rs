// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod error;
mod express;
mod indexer;
mod log;
mod substrate;

pub use args::Args;
pub use error::ConfigError;
pub use express::ExpressConfig;
pub use indexer::{AccountLayoutName, IndexerConfig};
pub use log::LogConfig;
pub use substrate::SubstrateConfig;

use serde::Deserialize;
use std::path::Path;

/// Flat view of every `SAS_` variable, as `envy` sees them.
///
/// `envy` cannot populate nested structs, so the environment is read into
/// this shape first and then split into the per-section configs.
#[derive(Debug, Deserialize)]
struct EnvVars {
    express_bind_host: Option<String>,
    express_port: Option<u16>,

    log_level: Option<String>,
    log_json: Option<bool>,
    log_strip_ansi: Option<bool>,
    log_write: Option<bool>,
    log_write_path: Option<String>,
    log_write_max_file_size: Option<u64>,
    log_write_max_files: Option<usize>,
    log_loki_url: Option<String>,

    substrate_url: Option<String>,
    substrate_ss58_prefix: Option<u16>,

    indexer_fee_events: Option<Vec<String>>,
    indexer_account_layouts: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub express: ExpressConfig,
    pub log: LogConfig,
    pub substrate: SubstrateConfig,
    pub indexer: IndexerConfig,
}

impl AppConfig {
    /// Load the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars = envy::prefixed("SAS_").from_env::<EnvVars>()?;
        Self::from_vars(vars)
    }

    /// Load the configuration from an explicit list of `SAS_*` key/value pairs.
    pub fn from_iter<I>(iter: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = envy::prefixed("SAS_").from_iter::<_, EnvVars>(iter)?;
        Self::from_vars(vars)
    }

    /// Load a `.env` file (if present) into the environment, then read it.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            dotenv::from_path(path).map_err(|e| ConfigError::EnvFileError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }
        Self::from_env()
    }

    fn from_vars(vars: EnvVars) -> Result<Self, ConfigError> {
        let express_defaults = ExpressConfig::default();
        let log_defaults = LogConfig::default();
        let substrate_defaults = SubstrateConfig::default();
        let indexer_defaults = IndexerConfig::default();

        let indexer = IndexerConfig {
            fee_events: vars
                .indexer_fee_events
                .map(|events| {
                    events
                        .into_iter()
                        .map(|e| e.trim().to_string())
                        .filter(|e| !e.is_empty())
                        .collect()
                })
                .unwrap_or(indexer_defaults.fee_events),
            account_layouts: match vars.indexer_account_layouts {
                Some(entries) => IndexerConfig::parse_account_layouts(&entries)?,
                None => indexer_defaults.account_layouts,
            },
        };

        let config = Self {
            express: ExpressConfig {
                bind_host: vars.express_bind_host.unwrap_or(express_defaults.bind_host),
                port: vars.express_port.unwrap_or(express_defaults.port),
            },
            log: LogConfig {
                level: vars.log_level.unwrap_or(log_defaults.level),
                json: vars.log_json.unwrap_or(log_defaults.json),
                strip_ansi: vars.log_strip_ansi.unwrap_or(log_defaults.strip_ansi),
                write: vars.log_write.unwrap_or(log_defaults.write),
                write_path: vars.log_write_path.unwrap_or(log_defaults.write_path),
                write_max_file_size: vars
                    .log_write_max_file_size
                    .unwrap_or(log_defaults.write_max_file_size),
                write_max_files: vars
                    .log_write_max_files
                    .unwrap_or(log_defaults.write_max_files),
                loki_url: vars.log_loki_url.filter(|u| !u.is_empty()),
            },
            substrate: SubstrateConfig {
                url: vars.substrate_url.unwrap_or(substrate_defaults.url),
                ss58_prefix: vars.substrate_ss58_prefix,
            },
            indexer,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.express.validate()?;
        self.log.validate()?;
        self.substrate.validate()?;
        self.indexer.validate()?;
        Ok(())
    }
}
