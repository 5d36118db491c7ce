// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::codec::DecodedEvent;
use crate::consts::pallets;
use bigdecimal::Zero;
use bigdecimal::num_bigint::BigUint;
use std::collections::HashSet;

/// Sums the fee paid by one extrinsic from the events it emitted.
#[derive(Debug, Clone)]
pub struct FeeAggregator {
    fee_events: HashSet<String>,
}

impl FeeAggregator {
    pub fn new<I, S>(fee_events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fee_events: fee_events.into_iter().map(Into::into).collect(),
        }
    }

    fn is_fee_event(&self, event: &DecodedEvent) -> bool {
        self.fee_events.contains(&event.event_id)
            && pallets::FEE_MODULES.contains(&event.module_id.as_str())
    }

    /// Total of every Balance-typed param of fee-bearing events at `extrinsic_index`.
    ///
    /// Values that are not non-negative integers are skipped. Returns `"0"`
    /// when nothing matched.
    pub fn compute_fee(&self, events: &[DecodedEvent], extrinsic_index: u32) -> String {
        let mut total = BigUint::zero();

        let fee_params = events
            .iter()
            .filter(|e| e.extrinsic_index == Some(extrinsic_index) && self.is_fee_event(e))
            .flat_map(|e| e.params.iter())
            .filter(|p| p.type_name.contains("Balance"));

        for param in fee_params {
            let amount = param
                .value
                .as_decimal_string()
                .and_then(|s| s.parse::<BigUint>().ok());

            match amount {
                Some(amount) => total += amount,
                None => tracing::debug!(
                    extrinsic_index,
                    param = %param.name,
                    "Skipping fee param that is not an amount"
                ),
            }
        }

        total.to_string()
    }
}
