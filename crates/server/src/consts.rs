// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

/// JSON-RPC methods used against the node.
pub mod rpc {
    pub const RUNTIME_VERSION: &str = "state_getRuntimeVersion";
    pub const METADATA: &str = "state_getMetadata";
    pub const STORAGE: &str = "state_getStorage";
    pub const BLOCK: &str = "chain_getBlock";
    pub const BLOCK_HASH: &str = "chain_getBlockHash";
    pub const FINALIZED_HEAD: &str = "chain_getFinalizedHead";
}

/// Pallet, call, event and storage names the block pipeline reacts to.
pub mod pallets {
    pub const SYSTEM: &str = "System";
    pub const TIMESTAMP: &str = "Timestamp";
    pub const BALANCES: &str = "Balances";
    pub const UTILITY: &str = "Utility";
    pub const TREASURY: &str = "Treasury";

    pub const EVENTS_STORAGE: &str = "Events";
    pub const ACCOUNT_STORAGE: &str = "Account";
    pub const SS58_PREFIX_CONSTANT: &str = "SS58Prefix";

    pub const TIMESTAMP_PARAM: &str = "now";
    pub const TRANSFER_DEST_PARAM: &str = "dest";
    pub const BATCH_CALLS_PARAM: &str = "calls";

    /// Balances calls that move funds from the signer to `dest`.
    pub const TRANSFER_CALLS: &[&str] = &["transfer", "transfer_keep_alive", "transfer_allow_death"];

    /// Utility calls that carry a `calls` list of inner calls.
    pub const BATCH_CALLS: &[&str] = &["batch", "batch_all", "force_batch"];

    pub const EXTRINSIC_SUCCESS_EVENT: &str = "ExtrinsicSuccess";
    pub const EXTRINSIC_FAILED_EVENT: &str = "ExtrinsicFailed";
    pub const TRANSFER_EVENT: &str = "Transfer";

    /// Modules whose events may carry fee amounts.
    pub const FEE_MODULES: &[&str] = &[TREASURY, BALANCES];
}

/// SS58 prefix used when neither config nor metadata provides one.
pub const DEFAULT_SS58_PREFIX: u16 = 42;

/// Chain identity whose accounts use the providers/sufficients layout.
pub const CRAB_CHAIN: &str = "crab";
