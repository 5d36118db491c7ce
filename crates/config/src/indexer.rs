// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use serde::Deserialize;

/// Account storage layouts that can be assigned to a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountLayoutName {
    /// `nonce, refcount, data { free, reserved, misc_frozen, fee_frozen }`
    Legacy,
    /// Legacy plus `providers` and `sufficients` counters.
    RefCountWithProviders,
    /// `nonce, consumers, providers, sufficients, data { free, reserved, frozen, flags }`
    Frozen,
}

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Event names whose Balance-typed params count towards an extrinsic fee
    ///
    /// Env: SAS_INDEXER_FEE_EVENTS
    /// Format: comma separated list
    /// Default: Deposit
    pub fee_events: Vec<String>,

    /// Extra chain to account layout assignments, on top of the built-in ones
    ///
    /// Env: SAS_INDEXER_ACCOUNT_LAYOUTS
    /// Format: comma separated `chain=layout` pairs, e.g. `polkadot=frozen`
    /// Default: none
    pub account_layouts: Vec<(String, AccountLayoutName)>,
}

impl IndexerConfig {
    pub(crate) fn parse_account_layouts(
        entries: &[String],
    ) -> Result<Vec<(String, AccountLayoutName)>, ConfigError> {
        let mut layouts = Vec::with_capacity(entries.len());

        for entry in entries.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
            let Some((chain, layout)) = entry.split_once('=') else {
                return Err(ConfigError::InvalidAccountLayout {
                    entry: entry.to_string(),
                    reason: "expected chain=layout".to_string(),
                });
            };

            let chain = chain.trim().to_lowercase();
            if chain.is_empty() {
                return Err(ConfigError::InvalidAccountLayout {
                    entry: entry.to_string(),
                    reason: "chain name is empty".to_string(),
                });
            }

            let layout: AccountLayoutName = serde_json::from_value(serde_json::Value::String(
                layout.trim().to_lowercase(),
            ))
            .map_err(|e| ConfigError::InvalidAccountLayout {
                entry: entry.to_string(),
                reason: e.to_string(),
            })?;

            layouts.push((chain, layout));
        }

        Ok(layouts)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.fee_events.is_empty() {
            return Err(ConfigError::ValidateError(
                "At least one fee event must be configured".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            fee_events: vec!["Deposit".to_string()],
            account_layouts: Vec::new(),
        }
    }
}
