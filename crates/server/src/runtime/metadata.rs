// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime metadata parsing.
//!
//! V14 and V15 metadata are flattened into a [`RuntimeMetadataHandle`] that
//! only keeps what decoding needs: the type registry, the extrinsic layout and
//! per-pallet call/event/storage/constant pointers.

use crate::consts::pallets;
use crate::error::{KeyDerivationError, SchemaParseError};
use frame_decode::extrinsics::{Extrinsic, ExtrinsicDecodeError, decode_extrinsic};
use frame_metadata::{
    META_RESERVED, RuntimeMetadata, RuntimeMetadataPrefixed,
    v14::{self, StorageEntryType},
    v15,
};
use parity_scale_codec::Decode;
use scale_info::{PortableRegistry, TypeDef, form::PortableForm};
use std::sync::Arc;

pub use frame_metadata::v14::StorageHasher;

#[derive(Debug, Clone)]
pub enum StorageEntryKind {
    Plain {
        value_ty: u32,
    },
    Map {
        hashers: Vec<StorageHasher>,
        key_ty: u32,
        value_ty: u32,
    },
}

#[derive(Debug, Clone)]
pub struct StorageEntryInfo {
    pub name: String,
    pub kind: StorageEntryKind,
}

impl StorageEntryInfo {
    pub fn value_ty(&self) -> u32 {
        match self.kind {
            StorageEntryKind::Plain { value_ty } | StorageEntryKind::Map { value_ty, .. } => {
                value_ty
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PalletStorageInfo {
    pub prefix: String,
    pub entries: Vec<StorageEntryInfo>,
}

#[derive(Debug, Clone)]
pub struct ConstantInfo {
    pub name: String,
    pub ty: u32,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PalletInfo {
    pub name: String,
    pub index: u8,
    pub call_ty: Option<u32>,
    pub event_ty: Option<u32>,
    pub storage: Option<PalletStorageInfo>,
    pub constants: Vec<ConstantInfo>,
}

/// Extrinsic facts needed on top of what `frame-decode` reads itself.
#[derive(Debug, Clone)]
pub struct ExtrinsicLayout {
    pub version: u8,
    pub call_ty: u32,
}

/// The decoded metadata, kept whole so `frame-decode` can read extrinsic
/// layouts from it.
#[derive(Debug)]
enum FrameMetadata {
    V14(v14::RuntimeMetadataV14),
    V15(v15::RuntimeMetadataV15),
}

#[derive(Debug)]
pub struct RuntimeMetadataHandle {
    source: FrameMetadata,
    pallets: Vec<PalletInfo>,
    extrinsic: ExtrinsicLayout,
}

fn storage_info(storage: &v14::PalletStorageMetadata<PortableForm>) -> PalletStorageInfo {
    let entries = storage
        .entries
        .iter()
        .map(|entry| StorageEntryInfo {
            name: entry.name.clone(),
            kind: match &entry.ty {
                StorageEntryType::Plain(ty) => StorageEntryKind::Plain { value_ty: ty.id },
                StorageEntryType::Map {
                    hashers,
                    key,
                    value,
                } => StorageEntryKind::Map {
                    hashers: hashers.clone(),
                    key_ty: key.id,
                    value_ty: value.id,
                },
            },
        })
        .collect();

    PalletStorageInfo {
        prefix: storage.prefix.clone(),
        entries,
    }
}

// V14 and V15 pallets share field names but not types.
macro_rules! pallet_info {
    ($pallet:expr) => {{
        let pallet = $pallet;
        PalletInfo {
            name: pallet.name.clone(),
            index: pallet.index,
            call_ty: pallet.calls.as_ref().map(|c| c.ty.id),
            event_ty: pallet.event.as_ref().map(|e| e.ty.id),
            storage: pallet.storage.as_ref().map(storage_info),
            constants: pallet
                .constants
                .iter()
                .map(|c| ConstantInfo {
                    name: c.name.clone(),
                    ty: c.ty.id,
                    value: c.value.clone(),
                })
                .collect(),
        }
    }};
}

impl RuntimeMetadataHandle {
    fn from_v14(metadata: v14::RuntimeMetadataV14) -> Result<Self, SchemaParseError> {
        let extrinsic_ty = metadata
            .types
            .resolve(metadata.extrinsic.ty.id)
            .ok_or(SchemaParseError::UnknownType(metadata.extrinsic.ty.id))?;

        // V14 only names the call type as a generic param of UncheckedExtrinsic.
        let call_ty = extrinsic_ty
            .type_params
            .iter()
            .find(|p| p.name == "Call")
            .and_then(|p| p.ty.as_ref())
            .map(|ty| ty.id)
            .ok_or(SchemaParseError::MissingExtrinsicType("Call"))?;

        let extrinsic = ExtrinsicLayout {
            version: metadata.extrinsic.version,
            call_ty,
        };
        let pallets = metadata.pallets.iter().map(|p| pallet_info!(p)).collect();

        Ok(Self {
            source: FrameMetadata::V14(metadata),
            pallets,
            extrinsic,
        })
    }

    fn from_v15(metadata: v15::RuntimeMetadataV15) -> Result<Self, SchemaParseError> {
        let extrinsic = ExtrinsicLayout {
            version: metadata.extrinsic.version,
            call_ty: metadata.extrinsic.call_ty.id,
        };
        let pallets = metadata.pallets.iter().map(|p| pallet_info!(p)).collect();

        Ok(Self {
            source: FrameMetadata::V15(metadata),
            pallets,
            extrinsic,
        })
    }

    pub fn metadata_version(&self) -> u32 {
        match self.source {
            FrameMetadata::V14(_) => 14,
            FrameMetadata::V15(_) => 15,
        }
    }

    pub fn types(&self) -> &PortableRegistry {
        match &self.source {
            FrameMetadata::V14(metadata) => &metadata.types,
            FrameMetadata::V15(metadata) => &metadata.types,
        }
    }

    pub fn extrinsic(&self) -> &ExtrinsicLayout {
        &self.extrinsic
    }

    /// Split one length-prefixed extrinsic at `cursor` into the byte ranges
    /// of its address, signature, extensions and call.
    pub fn decode_extrinsic_envelope(
        &self,
        cursor: &mut &[u8],
    ) -> Result<Extrinsic<'_, u32>, ExtrinsicDecodeError> {
        match &self.source {
            FrameMetadata::V14(metadata) => decode_extrinsic(cursor, metadata, &metadata.types),
            FrameMetadata::V15(metadata) => decode_extrinsic(cursor, metadata, &metadata.types),
        }
    }

    pub fn pallets(&self) -> &[PalletInfo] {
        &self.pallets
    }

    pub fn pallet(&self, name: &str) -> Option<&PalletInfo> {
        self.pallets.iter().find(|p| p.name == name)
    }

    /// Pallet and call variant index for `module.function`.
    pub fn call_index(&self, module: &str, function: &str) -> Option<(u8, u8)> {
        let pallet = self.pallet(module)?;
        let call_ty = self.types().resolve(pallet.call_ty?)?;
        let TypeDef::Variant(calls) = &call_ty.type_def else {
            return None;
        };
        calls
            .variants
            .iter()
            .find(|v| v.name == function)
            .map(|v| (pallet.index, v.index))
    }

    /// Storage prefix and entry for `pallet.item`.
    pub fn storage_entry(
        &self,
        pallet: &str,
        item: &str,
    ) -> Result<(&PalletStorageInfo, &StorageEntryInfo), KeyDerivationError> {
        let storage = self
            .pallet(pallet)
            .and_then(|p| p.storage.as_ref())
            .ok_or_else(|| KeyDerivationError::UnknownPallet(pallet.to_string()))?;

        let entry = storage
            .entries
            .iter()
            .find(|e| e.name == item)
            .ok_or_else(|| KeyDerivationError::UnknownItem {
                pallet: pallet.to_string(),
                item: item.to_string(),
            })?;

        Ok((storage, entry))
    }

    /// The `System.SS58Prefix` constant, when the runtime declares one.
    pub fn ss58_prefix(&self) -> Option<u16> {
        let constant = self
            .pallet(pallets::SYSTEM)?
            .constants
            .iter()
            .find(|c| c.name == pallets::SS58_PREFIX_CONSTANT)?;
        u16::decode(&mut &constant.value[..]).ok()
    }
}

/// Turns raw metadata bytes into a [`RuntimeMetadataHandle`].
pub trait MetadataParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Arc<RuntimeMetadataHandle>, SchemaParseError>;
}

/// [`MetadataParser`] for `frame-metadata` encoded V14/V15 metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameMetadataParser;

impl MetadataParser for FrameMetadataParser {
    fn parse(&self, bytes: &[u8]) -> Result<Arc<RuntimeMetadataHandle>, SchemaParseError> {
        let prefixed = RuntimeMetadataPrefixed::decode(&mut &bytes[..])?;
        if prefixed.0 != META_RESERVED {
            return Err(SchemaParseError::InvalidMagic);
        }

        let handle = match prefixed.1 {
            RuntimeMetadata::V14(metadata) => RuntimeMetadataHandle::from_v14(metadata)?,
            RuntimeMetadata::V15(metadata) => RuntimeMetadataHandle::from_v15(metadata)?,
            other => return Err(SchemaParseError::UnsupportedVersion(other.version())),
        };

        tracing::debug!(
            metadata_version = handle.metadata_version(),
            pallets = handle.pallets.len(),
            "Parsed runtime metadata"
        );

        Ok(Arc::new(handle))
    }
}

/// Parse the hex payload of `state_getMetadata`.
pub fn parse_metadata_hex(
    parser: &dyn MetadataParser,
    hex_str: &str,
) -> Result<Arc<RuntimeMetadataHandle>, SchemaParseError> {
    let bytes = hex::decode(hex_str.trim_start_matches("0x"))?;
    parser.parse(&bytes)
}
