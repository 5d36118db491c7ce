// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Fail,
    /// No `ExtrinsicSuccess`/`ExtrinsicFailed` event was found for the extrinsic.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Transfer,
}

/// A transfer-shaped extrinsic pulled out of a block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCandidate {
    pub extrinsic_index: u32,
    pub tx_hash: String,
    pub from: String,
    pub to: String,
    pub signature: String,
    pub nonce: u64,
    pub era: String,
}

/// A `Balances.Transfer` event matched to an extrinsic index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationResult {
    pub extrinsic_index: u32,
    pub event_index: u32,
    pub from: String,
    pub to: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrinsicResponse {
    pub extrinsic_index: u32,
    pub hash: String,
    pub from: String,
    pub to: String,
    pub signature: String,
    pub nonce: u64,
    pub era: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TxStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub tx_type: Option<TxType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_index: Option<u32>,
}

impl From<TransferCandidate> for ExtrinsicResponse {
    fn from(candidate: TransferCandidate) -> Self {
        Self {
            extrinsic_index: candidate.extrinsic_index,
            hash: candidate.tx_hash,
            from: candidate.from,
            to: candidate.to,
            signature: candidate.signature,
            nonce: candidate.nonce,
            era: candidate.era,
            status: None,
            tx_type: None,
            amount: None,
            fee: None,
            event_index: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub height: u64,
    pub hash: String,
    pub parent_hash: String,
    /// Seconds since the Unix epoch, `0` when the block has no timestamp.
    pub timestamp: u64,
    pub extrinsics: Vec<ExtrinsicResponse>,
}

/// `chain_getBlock` result.
#[derive(Debug, Deserialize)]
pub(crate) struct SignedBlock {
    pub block: RawBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBlock {
    pub header: RawHeader,
    #[serde(default)]
    pub extrinsics: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawHeader {
    pub parent_hash: String,
    pub number: serde_json::Value,
}
