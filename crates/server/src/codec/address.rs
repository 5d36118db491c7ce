// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::AddressFormatError;
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};

/// Converts between 32 byte public keys and their textual form.
pub trait AddressCodec: Send + Sync {
    fn public_key_to_address(&self, public_key: &[u8; 32], prefix: u16) -> String;

    fn address_to_public_key(&self, address: &str) -> Result<[u8; 32], AddressFormatError>;
}

/// SS58 addresses via `sp-core`. `0x` prefixed hex public keys are accepted on input too.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ss58AddressCodec;

impl AddressCodec for Ss58AddressCodec {
    fn public_key_to_address(&self, public_key: &[u8; 32], prefix: u16) -> String {
        AccountId32::from(*public_key)
            .to_ss58check_with_version(Ss58AddressFormat::custom(prefix))
    }

    fn address_to_public_key(&self, address: &str) -> Result<[u8; 32], AddressFormatError> {
        if let Some(hex_key) = address.strip_prefix("0x") {
            let bytes = hex::decode(hex_key)
                .map_err(|_| AddressFormatError::InvalidPublicKey(address.to_string()))?;
            return <[u8; 32]>::try_from(bytes.as_slice())
                .map_err(|_| AddressFormatError::InvalidPublicKey(address.to_string()));
        }

        let (account, _format) = AccountId32::from_ss58check_with_version(address).map_err(|e| {
            AddressFormatError::InvalidSs58 {
                address: address.to_string(),
                reason: format!("{e:?}"),
            }
        })?;

        Ok(account.into())
    }
}
