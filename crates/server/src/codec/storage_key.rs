// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::KeyDerivationError;
use crate::runtime::{RuntimeMetadataHandle, StorageEntryKind, StorageHasher};
use sp_crypto_hashing::{blake2_128, blake2_256, twox_64, twox_128, twox_256};

/// Derives raw storage keys for `pallet.item` lookups.
pub trait StorageKeyDeriver: Send + Sync {
    /// `args` are the SCALE encoded map keys, one per hasher of the entry.
    fn derive_key(
        &self,
        metadata: &RuntimeMetadataHandle,
        pallet: &str,
        item: &str,
        args: &[Vec<u8>],
    ) -> Result<String, KeyDerivationError>;
}

/// [`StorageKeyDeriver`] using the hashers declared in the metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataStorageKeys;

fn hash_key(key_bytes: &[u8], hasher: &StorageHasher) -> Vec<u8> {
    match hasher {
        StorageHasher::Blake2_128 => blake2_128(key_bytes).to_vec(),
        StorageHasher::Blake2_256 => blake2_256(key_bytes).to_vec(),
        StorageHasher::Blake2_128Concat => {
            let mut result = blake2_128(key_bytes).to_vec();
            result.extend_from_slice(key_bytes);
            result
        }
        StorageHasher::Twox128 => twox_128(key_bytes).to_vec(),
        StorageHasher::Twox256 => twox_256(key_bytes).to_vec(),
        StorageHasher::Twox64Concat => {
            let mut result = twox_64(key_bytes).to_vec();
            result.extend_from_slice(key_bytes);
            result
        }
        StorageHasher::Identity => key_bytes.to_vec(),
    }
}

impl StorageKeyDeriver for MetadataStorageKeys {
    fn derive_key(
        &self,
        metadata: &RuntimeMetadataHandle,
        pallet: &str,
        item: &str,
        args: &[Vec<u8>],
    ) -> Result<String, KeyDerivationError> {
        let (storage, entry) = metadata.storage_entry(pallet, item)?;

        let hashers: &[StorageHasher] = match &entry.kind {
            StorageEntryKind::Plain { .. } => &[],
            StorageEntryKind::Map { hashers, .. } => hashers,
        };
        if hashers.len() != args.len() {
            return Err(KeyDerivationError::KeyCountMismatch {
                pallet: pallet.to_string(),
                item: item.to_string(),
                expected: hashers.len(),
                got: args.len(),
            });
        }

        let mut key = twox_128(storage.prefix.as_bytes()).to_vec();
        key.extend_from_slice(&twox_128(entry.name.as_bytes()));
        for (arg, hasher) in args.iter().zip(hashers) {
            key.extend(hash_key(arg, hasher));
        }

        Ok(format!("0x{}", hex::encode(key)))
    }
}
