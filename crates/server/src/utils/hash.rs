// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::DecodeError;
use sp_crypto_hashing::blake2_256;

/// Transaction hash of a hex encoded extrinsic.
///
/// The extrinsic is hashed exactly as it appears in the block body, length
/// prefix included, with Blake2b-256. The `0x` prefix on input is optional.
pub fn tx_hash(raw_hex: &str) -> Result<String, DecodeError> {
    let bytes = hex::decode(raw_hex.strip_prefix("0x").unwrap_or(raw_hex))?;
    Ok(format!("0x{}", hex::encode(blake2_256(&bytes))))
}

/// Header number as served by `chain_getBlock`.
///
/// Full nodes send a hex string, light clients a plain JSON number.
pub fn parse_block_number_from_json(value: &serde_json::Value) -> Result<u64, String> {
    match value {
        serde_json::Value::String(number) => {
            let digits = number.trim_start_matches("0x");
            u64::from_str_radix(digits, 16).map_err(|e| format!("block number '{number}': {e}"))
        }
        other => other
            .as_u64()
            .ok_or_else(|| format!("block number must be hex or an unsigned integer, got {other}")),
    }
}
