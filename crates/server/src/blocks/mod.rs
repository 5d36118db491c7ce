// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Block pipeline: body extraction, event reconciliation and fee totals.

pub mod assembler;
pub mod fee;
pub mod reconcile;
pub mod types;

pub use assembler::BlockAssembler;
pub use fee::FeeAggregator;
pub use reconcile::{Correlation, EventReconciler};
pub use types::{BlockResponse, CorrelationResult, ExtrinsicResponse, TransferCandidate, TxStatus, TxType};
