// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::client::ChainClient;
use crate::routes::RouteRegistry;
use config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: Arc<ChainClient>,
    pub route_registry: RouteRegistry,
}

impl AppState {
    /// Connect to the configured node and warm up the runtime snapshot.
    ///
    /// A node that is reachable but fails the first refresh is logged and
    /// retried lazily by the first request.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let client = ChainClient::connect(&config).await?;

        match client.session().ensure_fresh().await {
            Ok(snapshot) => tracing::info!(
                chain = %snapshot.chain,
                spec_version = snapshot.spec_version,
                ss58_prefix = snapshot.ss58_prefix,
                "Loaded runtime metadata"
            ),
            Err(e) => tracing::warn!(error = %e, "Initial runtime refresh failed"),
        }

        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: AppConfig, client: Arc<ChainClient>) -> Self {
        Self {
            config,
            client,
            route_registry: RouteRegistry::new(),
        }
    }
}
