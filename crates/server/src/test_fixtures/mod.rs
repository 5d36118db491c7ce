// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! A miniature runtime for unit tests.
//!
//! Metadata is built from `scale-info` derived types laid out like a real
//! Substrate runtime (System 0, Timestamp 2, Balances 5, Treasury 19,
//! Utility 26), so extrinsics and events encoded with these types decode
//! exactly like chain data would. [`ChainMock`] serves that runtime over the
//! [`Transport`] seam.

#![allow(non_camel_case_types, dead_code)]

use crate::error::TransportError;
use crate::rpc::Transport;
use crate::runtime::{FrameMetadataParser, MetadataParser, RuntimeMetadataHandle};
use frame_metadata::{
    META_RESERVED, RuntimeMetadata, RuntimeMetadataPrefixed,
    v14::{
        ExtrinsicMetadata, PalletCallMetadata, PalletConstantMetadata, PalletEventMetadata,
        PalletMetadata, PalletStorageMetadata, RuntimeMetadataV14, SignedExtensionMetadata,
        StorageEntryMetadata, StorageEntryModifier, StorageEntryType, StorageHasher,
    },
};
use futures::future::BoxFuture;
use parity_scale_codec::{Compact, Encode};
use scale_info::{TypeInfo, meta_type};
use serde_json::{Value, json};
use sp_runtime::generic::Era;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};

pub const TEST_SPEC_VERSION: u32 = 9430;
pub const TEST_SS58_PREFIX: u16 = 7;
pub const TEST_GENESIS_HASH: &str =
    "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3";

pub const ALICE: [u8; 32] = [0xA1; 32];
pub const BOB: [u8; 32] = [0xB0; 32];
pub const CHARLIE: [u8; 32] = [0xC4; 32];
pub const DAVE: [u8; 32] = [0xDA; 32];

pub type Balance = u128;
pub type Moment = u64;
pub type AccountId = AccountId32;

#[derive(Clone, Encode, TypeInfo)]
pub struct AccountId32(pub [u8; 32]);

#[derive(Clone, Encode, TypeInfo)]
pub enum MultiAddress {
    Id(AccountId32),
    Index(#[codec(compact)] u32),
    Raw(Vec<u8>),
    Address32([u8; 32]),
    Address20([u8; 20]),
}

#[derive(Clone, Encode, TypeInfo)]
pub enum MultiSignature {
    Ed25519([u8; 64]),
    Sr25519([u8; 64]),
    Ecdsa([u8; 65]),
}

#[derive(Clone, Encode, TypeInfo)]
pub struct CheckMortality(pub Era);

#[derive(Clone, Encode, TypeInfo)]
pub struct CheckNonce(#[codec(compact)] pub u32);

#[derive(Clone, Encode, TypeInfo)]
pub struct ChargeTransactionPayment(#[codec(compact)] pub Balance);

pub type SignedExtra = (CheckMortality, CheckNonce, ChargeTransactionPayment);

/// Only carries the generic params the metadata points at.
#[derive(TypeInfo)]
pub struct UncheckedExtrinsic<Address, Call, Signature, Extra>(
    PhantomData<(Address, Call, Signature, Extra)>,
);

#[derive(Clone, Encode, TypeInfo)]
pub enum SystemCall {
    #[codec(index = 0)]
    remark { remark: Vec<u8> },
}

#[derive(Clone, Encode, TypeInfo)]
pub enum TimestampCall {
    #[codec(index = 0)]
    set {
        #[codec(compact)]
        now: Moment,
    },
}

#[derive(Clone, Encode, TypeInfo)]
pub enum BalancesCall {
    #[codec(index = 0)]
    transfer {
        dest: MultiAddress,
        #[codec(compact)]
        value: Balance,
    },
    #[codec(index = 3)]
    transfer_keep_alive {
        dest: MultiAddress,
        #[codec(compact)]
        value: Balance,
    },
    #[codec(index = 7)]
    transfer_allow_death {
        dest: MultiAddress,
        #[codec(compact)]
        value: Balance,
    },
}

#[derive(Clone, Encode, TypeInfo)]
pub enum UtilityCall {
    #[codec(index = 0)]
    batch { calls: Vec<RuntimeCall> },
    #[codec(index = 2)]
    batch_all { calls: Vec<RuntimeCall> },
    #[codec(index = 4)]
    force_batch { calls: Vec<RuntimeCall> },
}

#[derive(Clone, Encode, TypeInfo)]
pub enum RuntimeCall {
    #[codec(index = 0)]
    System(SystemCall),
    #[codec(index = 2)]
    Timestamp(TimestampCall),
    #[codec(index = 5)]
    Balances(BalancesCall),
    #[codec(index = 26)]
    Utility(UtilityCall),
}

#[derive(Clone, Encode, TypeInfo)]
pub struct DispatchInfo {
    pub weight: u64,
}

#[derive(Clone, Encode, TypeInfo)]
pub enum DispatchError {
    Other,
    BadOrigin,
}

#[derive(Clone, Encode, TypeInfo)]
pub enum SystemEvent {
    #[codec(index = 0)]
    ExtrinsicSuccess { dispatch_info: DispatchInfo },
    #[codec(index = 1)]
    ExtrinsicFailed {
        dispatch_error: DispatchError,
        dispatch_info: DispatchInfo,
    },
}

#[derive(Clone, Encode, TypeInfo)]
pub enum BalancesEvent {
    #[codec(index = 2)]
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Balance,
    },
    #[codec(index = 7)]
    Deposit { who: AccountId, amount: Balance },
    #[codec(index = 8)]
    Withdraw { who: AccountId, amount: Balance },
}

#[derive(Clone, Encode, TypeInfo)]
pub enum TreasuryEvent {
    #[codec(index = 6)]
    Deposit { value: Balance },
}

#[derive(Clone, Encode, TypeInfo)]
pub enum UtilityEvent {
    #[codec(index = 1)]
    BatchCompleted,
}

#[derive(Clone, Encode, TypeInfo)]
pub enum RuntimeEvent {
    #[codec(index = 0)]
    System(SystemEvent),
    #[codec(index = 5)]
    Balances(BalancesEvent),
    #[codec(index = 19)]
    Treasury(TreasuryEvent),
    #[codec(index = 26)]
    Utility(UtilityEvent),
}

#[derive(Clone, Encode, TypeInfo)]
pub enum Phase {
    ApplyExtrinsic(u32),
    Finalization,
    Initialization,
}

#[derive(Clone, Encode, TypeInfo)]
pub struct EventRecord {
    pub phase: Phase,
    pub event: RuntimeEvent,
    pub topics: Vec<[u8; 32]>,
}

#[derive(Clone, Encode, TypeInfo)]
pub struct AccountData {
    pub free: Balance,
    pub reserved: Balance,
    pub misc_frozen: Balance,
    pub fee_frozen: Balance,
}

#[derive(Clone, Encode, TypeInfo)]
pub struct AccountInfo {
    pub nonce: u32,
    pub ref_count: u32,
    pub data: AccountData,
}

fn pallet(
    name: &'static str,
    index: u8,
    calls: Option<scale_info::MetaType>,
    event: Option<scale_info::MetaType>,
) -> PalletMetadata {
    PalletMetadata {
        name,
        storage: None,
        calls: calls.map(|ty| PalletCallMetadata { ty }),
        event: event.map(|ty| PalletEventMetadata { ty }),
        constants: vec![],
        error: None,
        index,
    }
}

fn system_pallet() -> PalletMetadata {
    let mut system = pallet(
        "System",
        0,
        Some(meta_type::<SystemCall>()),
        Some(meta_type::<SystemEvent>()),
    );
    system.storage = Some(PalletStorageMetadata {
        prefix: "System",
        entries: vec![
            StorageEntryMetadata {
                name: "Account",
                modifier: StorageEntryModifier::Default,
                ty: StorageEntryType::Map {
                    hashers: vec![StorageHasher::Blake2_128Concat],
                    key: meta_type::<AccountId32>(),
                    value: meta_type::<AccountInfo>(),
                },
                default: vec![],
                docs: vec![],
            },
            StorageEntryMetadata {
                name: "Events",
                modifier: StorageEntryModifier::Default,
                ty: StorageEntryType::Plain(meta_type::<Vec<EventRecord>>()),
                default: vec![],
                docs: vec![],
            },
        ],
    });
    system.constants = vec![PalletConstantMetadata {
        name: "SS58Prefix",
        ty: meta_type::<u16>(),
        value: TEST_SS58_PREFIX.encode(),
        docs: vec![],
    }];
    system
}

/// SCALE encoded, magic-prefixed V14 metadata of the test runtime.
pub fn metadata_bytes() -> Vec<u8> {
    let pallets = vec![
        system_pallet(),
        pallet("Timestamp", 2, Some(meta_type::<TimestampCall>()), None),
        pallet(
            "Balances",
            5,
            Some(meta_type::<BalancesCall>()),
            Some(meta_type::<BalancesEvent>()),
        ),
        pallet("Treasury", 19, None, Some(meta_type::<TreasuryEvent>())),
        pallet(
            "Utility",
            26,
            Some(meta_type::<UtilityCall>()),
            Some(meta_type::<UtilityEvent>()),
        ),
    ];

    let extrinsic = ExtrinsicMetadata {
        ty: meta_type::<UncheckedExtrinsic<MultiAddress, RuntimeCall, MultiSignature, SignedExtra>>(),
        version: 4,
        signed_extensions: vec![
            SignedExtensionMetadata {
                identifier: "CheckMortality",
                ty: meta_type::<CheckMortality>(),
                additional_signed: meta_type::<[u8; 32]>(),
            },
            SignedExtensionMetadata {
                identifier: "CheckNonce",
                ty: meta_type::<CheckNonce>(),
                additional_signed: meta_type::<()>(),
            },
            SignedExtensionMetadata {
                identifier: "ChargeTransactionPayment",
                ty: meta_type::<ChargeTransactionPayment>(),
                additional_signed: meta_type::<()>(),
            },
        ],
    };

    let metadata = RuntimeMetadataV14::new(pallets, extrinsic, meta_type::<()>());
    RuntimeMetadataPrefixed(META_RESERVED, RuntimeMetadata::V14(metadata)).encode()
}

pub fn metadata() -> Arc<RuntimeMetadataHandle> {
    FrameMetadataParser
        .parse(&metadata_bytes())
        .expect("test metadata parses")
}

pub fn signed_extrinsic(
    signer: [u8; 32],
    signature: [u8; 64],
    nonce: u32,
    era: Era,
    call: RuntimeCall,
) -> Vec<u8> {
    let mut body = vec![0x84];
    MultiAddress::Id(AccountId32(signer)).encode_to(&mut body);
    MultiSignature::Sr25519(signature).encode_to(&mut body);
    (
        CheckMortality(era),
        CheckNonce(nonce),
        ChargeTransactionPayment(0),
    )
        .encode_to(&mut body);
    call.encode_to(&mut body);
    body.encode()
}

pub fn unsigned_extrinsic(call: RuntimeCall) -> Vec<u8> {
    let mut body = vec![0x04];
    call.encode_to(&mut body);
    body.encode()
}

pub fn transfer(dest: [u8; 32], value: Balance) -> RuntimeCall {
    RuntimeCall::Balances(BalancesCall::transfer {
        dest: MultiAddress::Id(AccountId32(dest)),
        value,
    })
}

pub fn transfer_keep_alive(dest: [u8; 32], value: Balance) -> RuntimeCall {
    RuntimeCall::Balances(BalancesCall::transfer_keep_alive {
        dest: MultiAddress::Id(AccountId32(dest)),
        value,
    })
}

/// A transfer addressed by account index instead of account id.
pub fn transfer_to_index(index: u32, value: Balance) -> RuntimeCall {
    RuntimeCall::Balances(BalancesCall::transfer {
        dest: MultiAddress::Index(index),
        value,
    })
}

pub fn batch(calls: Vec<RuntimeCall>) -> RuntimeCall {
    RuntimeCall::Utility(UtilityCall::batch { calls })
}

pub fn timestamp_set(now: Moment) -> RuntimeCall {
    RuntimeCall::Timestamp(TimestampCall::set { now })
}

pub fn remark(remark: Vec<u8>) -> RuntimeCall {
    RuntimeCall::System(SystemCall::remark { remark })
}

pub fn events_bytes(records: Vec<EventRecord>) -> Vec<u8> {
    records.encode()
}

pub fn record(extrinsic_index: Option<u32>, event: RuntimeEvent) -> EventRecord {
    EventRecord {
        phase: extrinsic_index.map_or(Phase::Finalization, Phase::ApplyExtrinsic),
        event,
        topics: vec![],
    }
}

pub fn extrinsic_success() -> RuntimeEvent {
    RuntimeEvent::System(SystemEvent::ExtrinsicSuccess {
        dispatch_info: DispatchInfo { weight: 1_000 },
    })
}

pub fn extrinsic_failed() -> RuntimeEvent {
    RuntimeEvent::System(SystemEvent::ExtrinsicFailed {
        dispatch_error: DispatchError::BadOrigin,
        dispatch_info: DispatchInfo { weight: 1_000 },
    })
}

pub fn balances_transfer(from: [u8; 32], to: [u8; 32], amount: Balance) -> RuntimeEvent {
    RuntimeEvent::Balances(BalancesEvent::Transfer {
        from: AccountId32(from),
        to: AccountId32(to),
        amount,
    })
}

pub fn balances_deposit(who: [u8; 32], amount: Balance) -> RuntimeEvent {
    RuntimeEvent::Balances(BalancesEvent::Deposit {
        who: AccountId32(who),
        amount,
    })
}

pub fn balances_withdraw(who: [u8; 32], amount: Balance) -> RuntimeEvent {
    RuntimeEvent::Balances(BalancesEvent::Withdraw {
        who: AccountId32(who),
        amount,
    })
}

pub fn treasury_deposit(value: Balance) -> RuntimeEvent {
    RuntimeEvent::Treasury(TreasuryEvent::Deposit { value })
}

pub fn account_info(nonce: u32, free: Balance) -> AccountInfo {
    AccountInfo {
        nonce,
        ref_count: 1,
        data: AccountData {
            free,
            reserved: 0,
            misc_frozen: 0,
            fee_frozen: 0,
        },
    }
}

fn hex_of(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

struct ChainState {
    spec_name: String,
    spec_version: u32,
    metadata_hex: String,
    block_hashes: HashMap<u64, String>,
    blocks: HashMap<String, Value>,
    /// Block hash to encoded `System.Events`.
    events: HashMap<String, String>,
    /// Storage key to value at the best block.
    storage: HashMap<String, String>,
    finalized_head: Option<String>,
}

/// An in-memory node serving the test runtime.
#[derive(Clone)]
pub struct ChainMock {
    state: Arc<Mutex<ChainState>>,
}

impl ChainMock {
    pub fn new(spec_name: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(ChainState {
                spec_name: spec_name.to_string(),
                spec_version: TEST_SPEC_VERSION,
                metadata_hex: hex_of(&metadata_bytes()),
                block_hashes: HashMap::new(),
                blocks: HashMap::new(),
                events: HashMap::new(),
                storage: HashMap::new(),
                finalized_head: None,
            })),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ChainState) -> R) -> R {
        let mut state = self.state.lock().expect("chain mock lock");
        f(&mut state)
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    pub fn set_spec_version(&self, spec_version: u32) {
        self.with_state(|s| s.spec_version = spec_version);
    }

    pub fn set_metadata_hex(&self, metadata_hex: &str) {
        self.with_state(|s| s.metadata_hex = metadata_hex.to_string());
    }

    pub fn add_block(&self, hash: &str, number: u64, extrinsics: Vec<String>) {
        let block = json!({
            "block": {
                "header": {
                    "parentHash": format!("0x{}", "00".repeat(32)),
                    "number": format!("0x{number:x}"),
                    "stateRoot": format!("0x{}", "00".repeat(32)),
                    "extrinsicsRoot": format!("0x{}", "00".repeat(32)),
                    "digest": { "logs": [] }
                },
                "extrinsics": extrinsics
            },
            "justifications": null
        });
        self.with_state(|s| {
            s.block_hashes.insert(number, hash.to_string());
            s.blocks.insert(hash.to_string(), block);
        });
    }

    pub fn set_events(&self, block_hash: &str, events: Vec<u8>) {
        self.with_state(|s| s.events.insert(block_hash.to_string(), hex_of(&events)));
    }

    pub fn set_storage(&self, key: &str, value: &[u8]) {
        self.with_state(|s| s.storage.insert(key.to_string(), hex_of(value)));
    }

    pub fn set_finalized_head(&self, hash: &str) {
        self.with_state(|s| s.finalized_head = Some(hash.to_string()));
    }

    fn handle(&self, method: &str, params: &[Value]) -> Result<Value, TransportError> {
        self.with_state(|s| match method {
            "state_getRuntimeVersion" => Ok(json!({
                "specName": s.spec_name,
                "implName": s.spec_name,
                "specVersion": s.spec_version,
                "transactionVersion": 1,
            })),
            "state_getMetadata" => Ok(json!(s.metadata_hex)),
            "chain_getBlockHash" => {
                let number = params.first().and_then(Value::as_u64).unwrap_or_default();
                Ok(match s.block_hashes.get(&number) {
                    Some(hash) => json!(hash),
                    None if number == 0 => json!(TEST_GENESIS_HASH),
                    None => Value::Null,
                })
            }
            "chain_getBlock" => Ok(params
                .first()
                .and_then(Value::as_str)
                .and_then(|hash| s.blocks.get(hash).cloned())
                .unwrap_or(Value::Null)),
            "chain_getFinalizedHead" => Ok(s.finalized_head.clone().map_or(Value::Null, Value::from)),
            "state_getStorage" => {
                let key = params.first().and_then(Value::as_str).unwrap_or_default();
                let at = params.get(1).and_then(Value::as_str);
                let value = match at.and_then(|hash| s.events.get(hash)) {
                    Some(events) => Some(events.clone()),
                    None => s.storage.get(key).cloned(),
                };
                Ok(value.map_or(Value::Null, Value::from))
            }
            other => Err(TransportError::Rpc {
                method: other.to_string(),
                message: "Method not found".to_string(),
            }),
        })
    }
}

impl Transport for ChainMock {
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Vec<Value>,
    ) -> BoxFuture<'a, Result<Value, TransportError>> {
        let result = self.handle(method, &params);
        Box::pin(async move { result })
    }
}
