// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetches blocks and pulls transfer-shaped extrinsics out of their bodies.

use super::reconcile::EventReconciler;
use super::types::{BlockResponse, ExtrinsicResponse, SignedBlock, TransferCandidate};
use crate::codec::{AddressCodec, DecodedCall, DecodedExtrinsic, ExtrinsicCodec, ParamValue};
use crate::consts::{pallets, rpc};
use crate::error::{ClientError, DecodeError, TransportError};
use crate::rpc::{Transport, request_hex_string};
use crate::runtime::{RuntimeSession, RuntimeSnapshot};
use crate::utils::hash::{parse_block_number_from_json, tx_hash};
use serde_json::json;
use std::sync::Arc;

/// Timestamp and transfers gathered from one block body.
#[derive(Debug, Default)]
struct BodySummary {
    /// Seconds since the Unix epoch.
    timestamp: u64,
    candidates: Vec<TransferCandidate>,
}

fn is_transfer(call: &DecodedCall) -> bool {
    call.module == pallets::BALANCES && pallets::TRANSFER_CALLS.contains(&call.function.as_str())
}

fn is_batch(call: &DecodedCall) -> bool {
    call.module == pallets::UTILITY && pallets::BATCH_CALLS.contains(&call.function.as_str())
}

fn is_timestamp(call: &DecodedCall) -> bool {
    call.module == pallets::TIMESTAMP && call.param(pallets::TIMESTAMP_PARAM).is_some()
}

pub struct BlockAssembler {
    transport: Arc<dyn Transport>,
    session: Arc<RuntimeSession>,
    codec: Arc<dyn ExtrinsicCodec>,
    addresses: Arc<dyn AddressCodec>,
    reconciler: EventReconciler,
}

impl BlockAssembler {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<RuntimeSession>,
        codec: Arc<dyn ExtrinsicCodec>,
        addresses: Arc<dyn AddressCodec>,
        reconciler: EventReconciler,
    ) -> Self {
        Self {
            transport,
            session,
            codec,
            addresses,
            reconciler,
        }
    }

    pub async fn by_height(&self, height: u64) -> Result<BlockResponse, ClientError> {
        let hash = request_hex_string(self.transport.as_ref(), rpc::BLOCK_HASH, vec![json!(height)])
            .await?
            .ok_or_else(|| TransportError::empty(rpc::BLOCK_HASH))?;

        self.by_hash(&hash).await
    }

    /// Assemble the transfer view of the block with `hash`.
    ///
    /// A body that fails to decode yields the block with no extrinsics and
    /// whatever timestamp was read before the failure.
    pub async fn by_hash(&self, hash: &str) -> Result<BlockResponse, ClientError> {
        let snapshot = self.session.ensure_fresh().await?;
        let block = self.fetch_block(hash).await?;

        let height = parse_block_number_from_json(&block.block.header.number)
            .map_err(|e| TransportError::unexpected(rpc::BLOCK, e))?;

        let mut response = BlockResponse {
            height,
            hash: hash.to_string(),
            parent_hash: block.block.header.parent_hash,
            timestamp: 0,
            extrinsics: Vec::new(),
        };

        if block.block.extrinsics.is_empty() {
            return Ok(response);
        }

        let mut summary = BodySummary::default();
        if let Err(e) = self.summarize(&block.block.extrinsics, &snapshot, &mut summary) {
            tracing::warn!(
                block = %hash,
                height,
                error = %e,
                "Failed to decode block extrinsics, returning block without transfers"
            );
            summary.candidates.clear();
        }

        response.timestamp = summary.timestamp;
        response.extrinsics = summary
            .candidates
            .into_iter()
            .map(ExtrinsicResponse::from)
            .collect();

        self.reconciler.enrich(hash, &mut response, &snapshot).await?;

        tracing::debug!(
            block = %hash,
            height,
            transfers = response.extrinsics.len(),
            "Assembled block"
        );

        Ok(response)
    }

    async fn fetch_block(&self, hash: &str) -> Result<SignedBlock, TransportError> {
        let value = self.transport.request(rpc::BLOCK, vec![json!(hash)]).await?;
        if value.is_null() {
            return Err(TransportError::empty(rpc::BLOCK));
        }
        serde_json::from_value(value).map_err(|e| TransportError::unexpected(rpc::BLOCK, e.to_string()))
    }

    /// Header number of `hash`, or of the finalized head when no hash is given.
    pub async fn block_number(&self, hash: Option<&str>) -> Result<u64, ClientError> {
        let hash = match hash.filter(|h| !h.is_empty()) {
            Some(hash) => hash.to_string(),
            None => self.finalized_head().await?,
        };

        let block = self.fetch_block(&hash).await?;
        let number = parse_block_number_from_json(&block.block.header.number)
            .map_err(|e| TransportError::unexpected(rpc::BLOCK, e))?;
        Ok(number)
    }

    pub async fn finalized_head(&self) -> Result<String, ClientError> {
        let hash = request_hex_string(self.transport.as_ref(), rpc::FINALIZED_HEAD, vec![])
            .await?
            .ok_or_else(|| TransportError::empty(rpc::FINALIZED_HEAD))?;
        Ok(hash)
    }

    /// Decode every extrinsic in block order into `summary`.
    ///
    /// Stops at the first extrinsic that does not decode; `summary` keeps what
    /// was collected up to that point.
    fn summarize(
        &self,
        extrinsics: &[String],
        snapshot: &RuntimeSnapshot,
        summary: &mut BodySummary,
    ) -> Result<(), DecodeError> {
        for (index, raw) in extrinsics.iter().enumerate() {
            let index = u32::try_from(index)
                .map_err(|_| DecodeError::UnexpectedShape("extrinsic count".to_string()))?;
            let bytes = hex::decode(raw.trim_start_matches("0x"))?;
            let extrinsic = self.codec.decode_extrinsic(&bytes, &snapshot.metadata)?;

            if is_timestamp(&extrinsic.call) {
                let now = extrinsic
                    .call
                    .param(pallets::TIMESTAMP_PARAM)
                    .and_then(|p| p.value.as_u128())
                    .and_then(|ms| u64::try_from(ms / 1000).ok())
                    .ok_or_else(|| DecodeError::UnexpectedShape("timestamp".to_string()))?;
                summary.timestamp = now;
            } else if is_transfer(&extrinsic.call) {
                let hash = tx_hash(raw)?;
                let candidate = self.candidate(index, &hash, &extrinsic, &extrinsic.call, snapshot);
                summary.candidates.push(candidate);
            } else if is_batch(&extrinsic.call) {
                let hash = tx_hash(raw)?;
                for inner in Self::batch_calls(&extrinsic.call)?.filter(|c| is_transfer(c)) {
                    let candidate = self.candidate(index, &hash, &extrinsic, inner, snapshot);
                    summary.candidates.push(candidate);
                }
            }
        }

        Ok(())
    }

    fn batch_calls(call: &DecodedCall) -> Result<impl Iterator<Item = &DecodedCall>, DecodeError> {
        let calls = call
            .param(pallets::BATCH_CALLS_PARAM)
            .map(|p| &p.value)
            .ok_or_else(|| DecodeError::UnexpectedShape(format!("{}.{}", call.module, call.function)))?;

        let ParamValue::Sequence(calls) = calls else {
            return Err(DecodeError::UnexpectedShape(format!(
                "{}.{} calls",
                call.module, call.function
            )));
        };

        Ok(calls.iter().filter_map(ParamValue::as_call))
    }

    /// A candidate for `call`, carried by the outer `extrinsic` at `index`.
    fn candidate(
        &self,
        index: u32,
        tx_hash: &str,
        extrinsic: &DecodedExtrinsic,
        call: &DecodedCall,
        snapshot: &RuntimeSnapshot,
    ) -> TransferCandidate {
        let dest = call.param(pallets::TRANSFER_DEST_PARAM);
        let to = match dest.and_then(|p| p.value.account_id()) {
            Some(pk) => self.addresses.public_key_to_address(&pk, snapshot.ss58_prefix),
            None => {
                // Index, 20 byte or raw destinations have no SS58 form.
                tracing::debug!(
                    extrinsic_index = index,
                    module = %call.module,
                    function = %call.function,
                    dest = ?dest.map(|p| &p.value),
                    "Transfer destination is not an account id, leaving recipient empty"
                );
                String::new()
            }
        };

        let from = extrinsic
            .signer
            .map(|pk| self.addresses.public_key_to_address(&pk, snapshot.ss58_prefix))
            .unwrap_or_default();

        TransferCandidate {
            extrinsic_index: index,
            tx_hash: tx_hash.to_string(),
            from,
            to,
            signature: extrinsic.signature.clone().unwrap_or_default(),
            nonce: extrinsic.nonce.unwrap_or_default(),
            era: extrinsic.era.clone(),
        }
    }
}
