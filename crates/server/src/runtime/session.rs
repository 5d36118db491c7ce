// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime version tracking and metadata snapshots.
//!
//! The session publishes immutable [`RuntimeSnapshot`]s. Callers take one
//! snapshot at the start of an operation and decode everything against it,
//! so a runtime upgrade mid-request never mixes two schemas.

use super::metadata::{MetadataParser, RuntimeMetadataHandle, parse_metadata_hex};
use crate::consts::{DEFAULT_SS58_PREFIX, rpc};
use crate::error::{ClientError, TransportError};
use crate::rpc::{Transport, request_hex_string};
use serde::Deserialize;
use serde_json::json;
use ss58_registry::{Ss58AddressFormat, Ss58AddressFormatRegistry};
use std::sync::{Arc, OnceLock, RwLock};
use tokio::sync::Mutex;

/// Result of `state_getRuntimeVersion`, trimmed to what the session tracks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub spec_version: u32,
    #[serde(default)]
    pub transaction_version: u32,
}

/// Everything decoding needs for one runtime version.
#[derive(Debug, Clone)]
pub struct RuntimeSnapshot {
    /// Lowercased `specName`, e.g. `polkadot` or `crab`.
    pub chain: String,
    pub spec_version: u32,
    pub transaction_version: u32,
    pub ss58_prefix: u16,
    pub metadata: Arc<RuntimeMetadataHandle>,
}

pub struct RuntimeSession {
    transport: Arc<dyn Transport>,
    parser: Arc<dyn MetadataParser>,
    ss58_override: Option<u16>,
    current: RwLock<Option<Arc<RuntimeSnapshot>>>,
    refresh: Mutex<()>,
    genesis: OnceLock<String>,
}

/// SS58 prefix registered for a network name, if any.
fn registry_prefix(chain: &str) -> Option<u16> {
    Ss58AddressFormatRegistry::try_from(chain)
        .ok()
        .map(|registry| Ss58AddressFormat::from(registry).prefix())
}

impl RuntimeSession {
    pub fn new(
        transport: Arc<dyn Transport>,
        parser: Arc<dyn MetadataParser>,
        ss58_override: Option<u16>,
    ) -> Self {
        Self {
            transport,
            parser,
            ss58_override,
            current: RwLock::new(None),
            refresh: Mutex::new(()),
            genesis: OnceLock::new(),
        }
    }

    /// The current snapshot, without talking to the node.
    pub fn snapshot(&self) -> Option<Arc<RuntimeSnapshot>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, snapshot: Arc<RuntimeSnapshot>) {
        match self.current.write() {
            Ok(mut guard) => *guard = Some(snapshot),
            Err(poisoned) => *poisoned.into_inner() = Some(snapshot),
        }
    }

    fn resolve_ss58_prefix(&self, chain: &str, metadata: &RuntimeMetadataHandle) -> u16 {
        self.ss58_override
            .or_else(|| metadata.ss58_prefix())
            .or_else(|| registry_prefix(chain))
            .unwrap_or(DEFAULT_SS58_PREFIX)
    }

    pub async fn runtime_version(&self) -> Result<RuntimeVersion, TransportError> {
        let value = self.transport.request(rpc::RUNTIME_VERSION, vec![]).await?;
        if value.is_null() {
            return Err(TransportError::empty(rpc::RUNTIME_VERSION));
        }
        serde_json::from_value(value)
            .map_err(|e| TransportError::unexpected(rpc::RUNTIME_VERSION, e.to_string()))
    }

    /// Return the snapshot for `version` if the metadata can be kept.
    ///
    /// Identity fields are refreshed even when the spec version did not move.
    fn reuse(&self, version: &RuntimeVersion) -> Option<Arc<RuntimeSnapshot>> {
        let current = self.snapshot()?;
        if current.spec_version != version.spec_version {
            return None;
        }

        let chain = version.spec_name.to_lowercase();
        if current.chain == chain && current.transaction_version == version.transaction_version {
            return Some(current);
        }

        let updated = Arc::new(RuntimeSnapshot {
            ss58_prefix: self.resolve_ss58_prefix(&chain, &current.metadata),
            chain,
            transaction_version: version.transaction_version,
            ..(*current).clone()
        });
        self.publish(updated.clone());
        Some(updated)
    }

    /// Make sure the snapshot matches the node's current runtime.
    ///
    /// Metadata is only fetched and parsed when the spec version changed. If
    /// parsing fails the previous snapshot stays published and the next call
    /// tries again.
    pub async fn ensure_fresh(&self) -> Result<Arc<RuntimeSnapshot>, ClientError> {
        let version = self.runtime_version().await?;
        if let Some(snapshot) = self.reuse(&version) {
            return Ok(snapshot);
        }

        let _guard = self.refresh.lock().await;
        // Another task may have finished the same refresh while we waited.
        if let Some(snapshot) = self.reuse(&version) {
            return Ok(snapshot);
        }

        tracing::info!(
            chain = %version.spec_name,
            spec_version = version.spec_version,
            previous = ?self.snapshot().map(|s| s.spec_version),
            "Runtime version changed, fetching metadata"
        );

        let metadata_hex = request_hex_string(self.transport.as_ref(), rpc::METADATA, vec![])
            .await?
            .ok_or_else(|| TransportError::empty(rpc::METADATA))?;

        let metadata = parse_metadata_hex(self.parser.as_ref(), &metadata_hex).map_err(|e| {
            tracing::error!(
                spec_version = version.spec_version,
                error = %e,
                "Failed to parse runtime metadata"
            );
            e
        })?;

        let chain = version.spec_name.to_lowercase();
        let snapshot = Arc::new(RuntimeSnapshot {
            ss58_prefix: self.resolve_ss58_prefix(&chain, &metadata),
            chain,
            spec_version: version.spec_version,
            transaction_version: version.transaction_version,
            metadata,
        });
        self.publish(snapshot.clone());

        Ok(snapshot)
    }

    /// Genesis block hash, cached after the first successful lookup.
    ///
    /// Transport failures yield an empty string and nothing is cached.
    pub async fn genesis_id(&self) -> String {
        if let Some(hash) = self.genesis.get() {
            return hash.clone();
        }

        match request_hex_string(self.transport.as_ref(), rpc::BLOCK_HASH, vec![json!(0)]).await {
            Ok(Some(hash)) => self.genesis.get_or_init(|| hash).clone(),
            Ok(None) => {
                tracing::warn!("Node returned no genesis hash");
                String::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch genesis hash");
                String::new()
            }
        }
    }
}
