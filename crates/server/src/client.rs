// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! The caller-facing client: one object per node connection.

use crate::accounts::{AccountLayout, AccountState, AccountStateDecoder};
use crate::blocks::{BlockAssembler, BlockResponse, EventReconciler, FeeAggregator};
use crate::codec::{
    AddressCodec, ExtrinsicCodec, MetadataStorageKeys, ScaleCodec, Ss58AddressCodec,
    StorageKeyDeriver,
};
use crate::consts::{pallets, rpc};
use crate::error::{ClientError, DecodeError, NotFoundError, TransportError};
use crate::rpc::{RpcTransport, Transport, request_hex_string};
use crate::runtime::{FrameMetadataParser, MetadataParser, RuntimeSession};
use config::AppConfig;
use serde_json::json;
use std::sync::Arc;

/// The pluggable pieces behind a [`ChainClient`].
#[derive(Clone)]
pub struct Collaborators {
    pub parser: Arc<dyn MetadataParser>,
    pub codec: Arc<dyn ExtrinsicCodec>,
    pub addresses: Arc<dyn AddressCodec>,
    pub storage_keys: Arc<dyn StorageKeyDeriver>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            parser: Arc::new(FrameMetadataParser),
            codec: Arc::new(ScaleCodec),
            addresses: Arc::new(Ss58AddressCodec),
            storage_keys: Arc::new(MetadataStorageKeys),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Forces the SS58 prefix used to render addresses.
    pub ss58_prefix: Option<u16>,
    pub fee_events: Vec<String>,
    pub account_layouts: Vec<(String, AccountLayout)>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            ss58_prefix: None,
            fee_events: vec!["Deposit".to_string()],
            account_layouts: Vec::new(),
        }
    }
}

impl From<&AppConfig> for ClientOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            ss58_prefix: config.substrate.ss58_prefix,
            fee_events: config.indexer.fee_events.clone(),
            account_layouts: config.indexer.account_layouts.clone(),
        }
    }
}

pub struct ChainClient {
    transport: Arc<dyn Transport>,
    session: Arc<RuntimeSession>,
    blocks: BlockAssembler,
    accounts: AccountStateDecoder,
    addresses: Arc<dyn AddressCodec>,
    storage_keys: Arc<dyn StorageKeyDeriver>,
}

impl ChainClient {
    pub fn new(transport: Arc<dyn Transport>, options: ClientOptions) -> Self {
        Self::with_collaborators(transport, options, Collaborators::default())
    }

    pub fn with_collaborators(
        transport: Arc<dyn Transport>,
        options: ClientOptions,
        collaborators: Collaborators,
    ) -> Self {
        let session = Arc::new(RuntimeSession::new(
            transport.clone(),
            collaborators.parser,
            options.ss58_prefix,
        ));
        let reconciler = EventReconciler::new(
            transport.clone(),
            collaborators.codec.clone(),
            collaborators.addresses.clone(),
            collaborators.storage_keys.clone(),
            FeeAggregator::new(options.fee_events),
        );
        let blocks = BlockAssembler::new(
            transport.clone(),
            session.clone(),
            collaborators.codec,
            collaborators.addresses.clone(),
            reconciler,
        );

        Self {
            transport,
            session,
            blocks,
            accounts: AccountStateDecoder::with_overrides(options.account_layouts),
            addresses: collaborators.addresses,
            storage_keys: collaborators.storage_keys,
        }
    }

    /// Connect to the node configured in `config.substrate.url`.
    pub async fn connect(config: &AppConfig) -> Result<Self, TransportError> {
        let transport = RpcTransport::connect(&config.substrate.url).await?;
        Ok(Self::new(Arc::new(transport), ClientOptions::from(config)))
    }

    pub fn session(&self) -> &RuntimeSession {
        &self.session
    }

    pub async fn block_by_height(&self, height: u64) -> Result<BlockResponse, ClientError> {
        self.blocks.by_height(height).await
    }

    pub async fn block_by_hash(&self, hash: &str) -> Result<BlockResponse, ClientError> {
        self.blocks.by_hash(hash).await
    }

    /// Number of the block with `hash`, or of the finalized head.
    pub async fn block_number(&self, hash: Option<&str>) -> Result<u64, ClientError> {
        self.blocks.block_number(hash).await
    }

    pub async fn finalized_head(&self) -> Result<String, ClientError> {
        self.blocks.finalized_head().await
    }

    /// Decoded `System.Account` entry of `address` at the best block.
    ///
    /// Accounts with no storage entry come back zeroed.
    pub async fn account_info(&self, address: &str) -> Result<AccountState, ClientError> {
        let snapshot = self.session.ensure_fresh().await?;
        let public_key = self.addresses.address_to_public_key(address)?;
        let key = self.storage_keys.derive_key(
            &snapshot.metadata,
            pallets::SYSTEM,
            pallets::ACCOUNT_STORAGE,
            &[public_key.to_vec()],
        )?;

        let Some(raw) =
            request_hex_string(self.transport.as_ref(), rpc::STORAGE, vec![json!(key)]).await?
        else {
            return Ok(AccountState::default());
        };

        let bytes = hex::decode(raw.trim_start_matches("0x")).map_err(DecodeError::from)?;
        Ok(self.accounts.decode(&snapshot.chain, &bytes)?)
    }

    /// [`ChainClient::account_info`] serialized as JSON.
    pub async fn account_state(&self, address: &str) -> Result<Vec<u8>, ClientError> {
        let state = self.account_info(address).await?;
        Ok(serde_json::to_vec(&state)?)
    }

    /// Genesis block hash, or an empty string if the node could not be asked.
    pub async fn genesis_id(&self) -> String {
        self.session.genesis_id().await
    }

    /// Two byte call index of `module.function` as hex, e.g. `0500`.
    pub async fn call_index(&self, module: &str, function: &str) -> Result<String, ClientError> {
        let snapshot = self.session.ensure_fresh().await?;
        let (pallet, call) = snapshot
            .metadata
            .call_index(module, function)
            .ok_or_else(|| NotFoundError::Call {
                module: module.to_string(),
                function: function.to_string(),
            })?;
        Ok(format!("{pallet:02x}{call:02x}"))
    }
}
