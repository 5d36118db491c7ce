// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::layout::{FrozenAccountInfo, LegacyAccountInfo, RefCountWithProvidersAccountInfo};
use crate::consts::CRAB_CHAIN;
use crate::error::DecodeError;
use config::AccountLayoutName as AccountLayout;
use parity_scale_codec::{Decode, DecodeAll};
use serde::Serialize;
use std::collections::HashMap;

/// Account state in one shape regardless of the chain's storage layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountState {
    pub nonce: u32,
    pub ref_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub providers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sufficients: Option<u32>,
    pub data: AccountBalances,
}

/// Balances as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalances {
    pub free: String,
    pub reserved: String,
    pub misc_frozen: String,
    pub fee_frozen: String,
}

impl Default for AccountBalances {
    fn default() -> Self {
        let zero = || "0".to_string();
        Self {
            free: zero(),
            reserved: zero(),
            misc_frozen: zero(),
            fee_frozen: zero(),
        }
    }
}

impl From<LegacyAccountInfo> for AccountState {
    fn from(info: LegacyAccountInfo) -> Self {
        Self {
            nonce: info.nonce,
            ref_count: info.ref_count,
            providers: None,
            sufficients: None,
            data: AccountBalances {
                free: info.data.free.to_string(),
                reserved: info.data.reserved.to_string(),
                misc_frozen: info.data.misc_frozen.to_string(),
                fee_frozen: info.data.fee_frozen.to_string(),
            },
        }
    }
}

impl From<RefCountWithProvidersAccountInfo> for AccountState {
    fn from(info: RefCountWithProvidersAccountInfo) -> Self {
        Self {
            nonce: info.nonce,
            ref_count: info.ref_count,
            providers: Some(info.providers),
            sufficients: Some(info.sufficients),
            data: AccountBalances {
                free: info.data.free.to_string(),
                reserved: info.data.reserved.to_string(),
                misc_frozen: info.data.misc_frozen.to_string(),
                fee_frozen: info.data.fee_frozen.to_string(),
            },
        }
    }
}

// `consumers` plays the role of the old reference counter, and the single
// `frozen` balance stands in for both of the old frozen amounts.
impl From<FrozenAccountInfo> for AccountState {
    fn from(info: FrozenAccountInfo) -> Self {
        let frozen = info.data.frozen.to_string();
        Self {
            nonce: info.nonce,
            ref_count: info.consumers,
            providers: Some(info.providers),
            sufficients: Some(info.sufficients),
            data: AccountBalances {
                free: info.data.free.to_string(),
                reserved: info.data.reserved.to_string(),
                misc_frozen: frozen.clone(),
                fee_frozen: frozen,
            },
        }
    }
}

fn decode_as<T>(bytes: &[u8]) -> Result<AccountState, DecodeError>
where
    T: Decode + Into<AccountState>,
{
    Ok(T::decode_all(&mut &bytes[..])?.into())
}

/// Picks the `System.Account` layout by chain identity and decodes with it.
#[derive(Debug, Clone)]
pub struct AccountStateDecoder {
    layouts: HashMap<String, AccountLayout>,
}

impl Default for AccountStateDecoder {
    fn default() -> Self {
        Self {
            layouts: HashMap::from([(
                CRAB_CHAIN.to_string(),
                AccountLayout::RefCountWithProviders,
            )]),
        }
    }
}

impl AccountStateDecoder {
    /// Built-in layouts plus `overrides`, which win over the built-in entries.
    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, AccountLayout)>,
    {
        let mut decoder = Self::default();
        for (chain, layout) in overrides {
            decoder.layouts.insert(chain.to_lowercase(), layout);
        }
        decoder
    }

    pub fn layout_for(&self, chain: &str) -> AccountLayout {
        self.layouts
            .get(&chain.to_lowercase())
            .copied()
            .unwrap_or(AccountLayout::Legacy)
    }

    pub fn decode(&self, chain: &str, bytes: &[u8]) -> Result<AccountState, DecodeError> {
        match self.layout_for(chain) {
            AccountLayout::Legacy => decode_as::<LegacyAccountInfo>(bytes),
            AccountLayout::RefCountWithProviders => {
                decode_as::<RefCountWithProvidersAccountInfo>(bytes)
            }
            AccountLayout::Frozen => decode_as::<FrozenAccountInfo>(bytes),
        }
    }
}
