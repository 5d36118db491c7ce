// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Binary codecs: extrinsics, events, addresses and storage keys.

pub mod address;
pub mod scale;
pub mod storage_key;
pub mod value;

pub use address::{AddressCodec, Ss58AddressCodec};
pub use scale::ScaleCodec;
pub use storage_key::{MetadataStorageKeys, StorageKeyDeriver};
pub use value::{DecodedCall, DecodedParam, ParamValue, TypeTag};

use crate::error::DecodeError;
use crate::runtime::RuntimeMetadataHandle;

/// One extrinsic decoded against runtime metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExtrinsic {
    pub call: DecodedCall,
    /// Public key of the signer; `None` for unsigned extrinsics.
    pub signer: Option<[u8; 32]>,
    pub signature: Option<String>,
    pub nonce: Option<u64>,
    /// Hex of the encoded era, `0x00` (immortal) when absent.
    pub era: String,
}

/// One `System.Events` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub module_id: String,
    pub event_id: String,
    /// Set for events emitted while applying an extrinsic.
    pub extrinsic_index: Option<u32>,
    /// Position in the block's event log.
    pub event_index: u32,
    pub params: Vec<DecodedParam>,
}

pub trait ExtrinsicCodec: Send + Sync {
    /// Decode one length-prefixed extrinsic.
    fn decode_extrinsic(
        &self,
        bytes: &[u8],
        metadata: &RuntimeMetadataHandle,
    ) -> Result<DecodedExtrinsic, DecodeError>;

    /// Decode the value of the `System.Events` storage item.
    fn decode_events(
        &self,
        bytes: &[u8],
        metadata: &RuntimeMetadataHandle,
    ) -> Result<Vec<DecodedEvent>, DecodeError>;
}
