// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

#[derive(Debug, Clone)]
pub struct SubstrateConfig {
    /// Substrate node WebSocket or HTTP URL
    ///
    /// Env: SAS_SUBSTRATE_URL
    /// Valid schemes: ws://, wss://, http://, https://
    /// Default: ws://127.0.0.1:9944
    pub url: String,

    /// SS58 prefix used when rendering addresses. When unset the prefix is
    /// taken from the runtime metadata.
    ///
    /// Env: SAS_SUBSTRATE_SS58_PREFIX
    pub ss58_prefix: Option<u16>,
}

impl SubstrateConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidateError(
                "Substrate URL cannot be empty".to_string(),
            ));
        }

        let parsed = url::Url::parse(&self.url)
            .map_err(|e| ConfigError::ValidateError(format!("Invalid URL '{}': {}", self.url, e)))?;

        match parsed.scheme() {
            "ws" | "wss" | "http" | "https" => {}
            scheme => {
                return Err(ConfigError::ValidateError(format!(
                    "Invalid URL scheme '{}'. Must be ws://, wss://, http://, or https://",
                    scheme
                )));
            }
        }

        // SS58 prefixes are 14 bit values.
        if let Some(prefix) = self.ss58_prefix
            && prefix > 16_383
        {
            return Err(ConfigError::ValidateError(format!(
                "SS58 prefix {} is out of range (0..=16383)",
                prefix
            )));
        }

        Ok(())
    }
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:9944".to_string(),
            ss58_prefix: None,
        }
    }
}
