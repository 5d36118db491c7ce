// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Correlates a block's `System.Events` with its transfer extrinsics.

use super::fee::FeeAggregator;
use super::types::{BlockResponse, CorrelationResult, TxStatus, TxType};
use crate::codec::{
    AddressCodec, DecodedEvent, ExtrinsicCodec, StorageKeyDeriver, TypeTag,
};
use crate::consts::{pallets, rpc};
use crate::error::{ClientError, DecodeError, TransportError};
use crate::rpc::{Transport, request_hex_string};
use crate::runtime::RuntimeSnapshot;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// What one pass over the event log found.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Correlation {
    /// Extrinsic index to dispatch outcome.
    pub statuses: HashMap<u32, bool>,
    pub transfers: Vec<CorrelationResult>,
}

pub struct EventReconciler {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn ExtrinsicCodec>,
    addresses: Arc<dyn AddressCodec>,
    storage_keys: Arc<dyn StorageKeyDeriver>,
    fees: FeeAggregator,
}

impl EventReconciler {
    pub fn new(
        transport: Arc<dyn Transport>,
        codec: Arc<dyn ExtrinsicCodec>,
        addresses: Arc<dyn AddressCodec>,
        storage_keys: Arc<dyn StorageKeyDeriver>,
        fees: FeeAggregator,
    ) -> Self {
        Self {
            transport,
            codec,
            addresses,
            storage_keys,
            fees,
        }
    }

    /// Fill in status, type, amount, fee and event index of the transfers in `response`.
    ///
    /// Fetch failures propagate. An event log that does not decode leaves the
    /// response as it was.
    pub async fn enrich(
        &self,
        block_hash: &str,
        response: &mut BlockResponse,
        snapshot: &RuntimeSnapshot,
    ) -> Result<(), ClientError> {
        let key = self.storage_keys.derive_key(
            &snapshot.metadata,
            pallets::SYSTEM,
            pallets::EVENTS_STORAGE,
            &[],
        )?;

        let raw = request_hex_string(
            self.transport.as_ref(),
            rpc::STORAGE,
            vec![json!(key), json!(block_hash)],
        )
        .await?
        .ok_or_else(|| TransportError::empty(rpc::STORAGE))?;

        let decoded = hex::decode(raw.trim_start_matches("0x"))
            .map_err(DecodeError::from)
            .and_then(|bytes| self.codec.decode_events(&bytes, &snapshot.metadata));

        let events = match decoded {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(
                    block = %block_hash,
                    height = response.height,
                    error = %e,
                    "Failed to decode block events, transfers left without status"
                );
                return Ok(());
            }
        };

        let correlation = self.correlate(&events, snapshot.ss58_prefix);
        self.merge(response, &correlation, &events);

        Ok(())
    }

    /// Collect dispatch outcomes and `Balances.Transfer` details from the event log.
    pub fn correlate(&self, events: &[DecodedEvent], ss58_prefix: u16) -> Correlation {
        let mut correlation = Correlation::default();

        for event in events {
            let Some(index) = event.extrinsic_index else {
                continue;
            };

            match event.event_id.as_str() {
                pallets::EXTRINSIC_FAILED_EVENT => {
                    correlation.statuses.insert(index, false);
                }
                pallets::EXTRINSIC_SUCCESS_EVENT => {
                    correlation.statuses.insert(index, true);
                }
                pallets::TRANSFER_EVENT if event.module_id == pallets::BALANCES => {
                    if event.params.is_empty() {
                        correlation.statuses.insert(index, false);
                        continue;
                    }
                    correlation
                        .transfers
                        .push(self.transfer_result(index, event, ss58_prefix));
                }
                _ => {}
            }
        }

        correlation
    }

    fn transfer_result(
        &self,
        extrinsic_index: u32,
        event: &DecodedEvent,
        ss58_prefix: u16,
    ) -> CorrelationResult {
        let mut result = CorrelationResult {
            extrinsic_index,
            event_index: event.event_index,
            from: String::new(),
            to: String::new(),
            amount: String::new(),
        };

        for (position, param) in event.params.iter().enumerate() {
            match param.tag {
                TypeTag::AccountId => {
                    let address = param
                        .value
                        .account_id()
                        .map(|pk| self.addresses.public_key_to_address(&pk, ss58_prefix))
                        .unwrap_or_default();
                    match position {
                        0 => result.from = address,
                        1 => result.to = address,
                        _ => {}
                    }
                }
                TypeTag::Balance => {
                    result.amount = param.value.as_decimal_string().unwrap_or_default();
                }
                _ => {}
            }
        }

        result
    }

    /// Apply the correlation to every extrinsic with a matching index and recipient.
    pub fn merge(
        &self,
        response: &mut BlockResponse,
        correlation: &Correlation,
        events: &[DecodedEvent],
    ) {
        for extrinsic in &mut response.extrinsics {
            for result in &correlation.transfers {
                if extrinsic.extrinsic_index != result.extrinsic_index || extrinsic.to != result.to
                {
                    continue;
                }

                extrinsic.status = Some(match correlation.statuses.get(&result.extrinsic_index) {
                    Some(true) => TxStatus::Success,
                    Some(false) => TxStatus::Fail,
                    None => TxStatus::Unknown,
                });
                extrinsic.tx_type = Some(TxType::Transfer);
                extrinsic.amount = Some(result.amount.clone());
                extrinsic.fee = Some(self.fees.compute_fee(events, result.extrinsic_index));
                extrinsic.event_index = Some(result.event_index);
                extrinsic.to = result.to.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::types::{ExtrinsicResponse, TransferCandidate};
    use crate::codec::{
        DecodedParam, MetadataStorageKeys, ParamValue, ScaleCodec, Ss58AddressCodec,
    };
    use crate::test_fixtures::{ALICE, BOB, CHARLIE, ChainMock};

    const PREFIX: u16 = 42;

    fn reconciler() -> EventReconciler {
        EventReconciler::new(
            ChainMock::new("node").transport(),
            Arc::new(ScaleCodec),
            Arc::new(Ss58AddressCodec),
            Arc::new(MetadataStorageKeys),
            FeeAggregator::new(["Deposit"]),
        )
    }

    fn address(pk: [u8; 32]) -> String {
        Ss58AddressCodec.public_key_to_address(&pk, PREFIX)
    }

    fn param(name: &str, type_name: &str, value: ParamValue) -> DecodedParam {
        DecodedParam {
            name: name.to_string(),
            type_name: type_name.to_string(),
            tag: TypeTag::from_type_name(type_name),
            value,
        }
    }

    fn event(
        module: &str,
        id: &str,
        extrinsic_index: u32,
        event_index: u32,
        params: Vec<DecodedParam>,
    ) -> DecodedEvent {
        DecodedEvent {
            module_id: module.to_string(),
            event_id: id.to_string(),
            extrinsic_index: Some(extrinsic_index),
            event_index,
            params,
        }
    }

    fn transfer_event(index: u32, event_index: u32, to: [u8; 32], amount: u128) -> DecodedEvent {
        event(
            "Balances",
            "Transfer",
            index,
            event_index,
            vec![
                param("from", "AccountId", ParamValue::Bytes(ALICE.to_vec())),
                param("to", "AccountId", ParamValue::Bytes(to.to_vec())),
                param("amount", "Balance", ParamValue::Uint(amount)),
            ],
        )
    }

    fn response_with(extrinsics: Vec<(u32, [u8; 32])>) -> BlockResponse {
        BlockResponse {
            height: 1,
            hash: "0x01".to_string(),
            parent_hash: "0x00".to_string(),
            timestamp: 0,
            extrinsics: extrinsics
                .into_iter()
                .map(|(index, to)| {
                    ExtrinsicResponse::from(TransferCandidate {
                        extrinsic_index: index,
                        tx_hash: format!("0x{index:02x}"),
                        from: address(ALICE),
                        to: address(to),
                        signature: "0xsig".to_string(),
                        nonce: 0,
                        era: "0x00".to_string(),
                    })
                })
                .collect(),
        }
    }

    #[test]
    fn transfer_with_success_event_is_enriched() {
        let reconciler = reconciler();
        let events = vec![
            transfer_event(2, 4, BOB, 1_000),
            event(
                "Treasury",
                "Deposit",
                2,
                5,
                vec![param("value", "Balance", ParamValue::Uint(30))],
            ),
            event(
                "Balances",
                "Deposit",
                2,
                6,
                vec![
                    param("who", "AccountId", ParamValue::Bytes(CHARLIE.to_vec())),
                    param("amount", "Balance", ParamValue::Uint(12)),
                ],
            ),
            event("System", "ExtrinsicSuccess", 2, 7, vec![]),
        ];
        let mut response = response_with(vec![(2, BOB)]);

        let correlation = reconciler.correlate(&events, PREFIX);
        reconciler.merge(&mut response, &correlation, &events);

        let extrinsic = &response.extrinsics[0];
        assert_eq!(extrinsic.status, Some(TxStatus::Success));
        assert_eq!(extrinsic.tx_type, Some(TxType::Transfer));
        assert_eq!(extrinsic.amount.as_deref(), Some("1000"));
        assert_eq!(extrinsic.fee.as_deref(), Some("42"));
        assert_eq!(extrinsic.event_index, Some(4));
        assert_eq!(extrinsic.to, address(BOB));
    }

    #[test]
    fn failed_extrinsic_is_marked_fail() {
        let reconciler = reconciler();
        let events = vec![
            transfer_event(1, 0, BOB, 5),
            event("System", "ExtrinsicFailed", 1, 1, vec![]),
        ];
        let mut response = response_with(vec![(1, BOB)]);

        let correlation = reconciler.correlate(&events, PREFIX);
        reconciler.merge(&mut response, &correlation, &events);

        assert_eq!(response.extrinsics[0].status, Some(TxStatus::Fail));
    }

    #[test]
    fn missing_dispatch_event_is_unknown() {
        let reconciler = reconciler();
        let events = vec![transfer_event(1, 0, BOB, 5)];
        let mut response = response_with(vec![(1, BOB)]);

        let correlation = reconciler.correlate(&events, PREFIX);
        reconciler.merge(&mut response, &correlation, &events);

        assert_eq!(response.extrinsics[0].status, Some(TxStatus::Unknown));
        assert_eq!(response.extrinsics[0].fee.as_deref(), Some("0"));
    }

    #[test]
    fn empty_transfer_event_marks_failure_without_correlation() {
        let reconciler = reconciler();
        let events = vec![
            event("System", "ExtrinsicSuccess", 3, 0, vec![]),
            event("Balances", "Transfer", 3, 1, vec![]),
        ];

        let correlation = reconciler.correlate(&events, PREFIX);
        assert!(correlation.transfers.is_empty());
        assert_eq!(correlation.statuses.get(&3), Some(&false));
    }

    #[test]
    fn join_requires_matching_recipient() {
        let reconciler = reconciler();
        let events = vec![
            transfer_event(5, 0, BOB, 1),
            transfer_event(5, 1, CHARLIE, 2),
            event("System", "ExtrinsicSuccess", 5, 2, vec![]),
        ];
        let mut response = response_with(vec![(5, CHARLIE), (5, BOB), (5, ALICE)]);

        let correlation = reconciler.correlate(&events, PREFIX);
        reconciler.merge(&mut response, &correlation, &events);

        assert_eq!(response.extrinsics[0].amount.as_deref(), Some("2"));
        assert_eq!(response.extrinsics[0].event_index, Some(1));
        assert_eq!(response.extrinsics[1].amount.as_deref(), Some("1"));
        assert_eq!(response.extrinsics[1].event_index, Some(0));
        assert!(response.extrinsics[2].status.is_none());
        assert!(response.extrinsics[2].tx_type.is_none());
    }

    #[test]
    fn events_outside_extrinsics_are_ignored() {
        let reconciler = reconciler();
        let mut finalization = transfer_event(0, 0, BOB, 9);
        finalization.extrinsic_index = None;

        let correlation = reconciler.correlate(&[finalization], PREFIX);
        assert_eq!(correlation, Correlation::default());
    }
}
