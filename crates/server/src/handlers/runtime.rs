// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{ClientError, TransportError};
use crate::consts::rpc;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisResponse {
    pub genesis_hash: String,
}

/// Handler for GET /runtime/genesis
pub async fn get_genesis(
    State(state): State<AppState>,
) -> Result<Json<GenesisResponse>, ClientError> {
    let genesis_hash = state.client.genesis_id().await;
    if genesis_hash.is_empty() {
        return Err(TransportError::empty(rpc::BLOCK_HASH).into());
    }
    Ok(Json(GenesisResponse { genesis_hash }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallIndexResponse {
    pub module: String,
    pub function: String,
    pub call_index: String,
}

/// Handler for GET /runtime/call-index/{module}/{function}
pub async fn get_call_index(
    State(state): State<AppState>,
    Path((module, function)): Path<(String, String)>,
) -> Result<Json<CallIndexResponse>, ClientError> {
    let call_index = state.client.call_index(&module, &function).await?;
    Ok(Json(CallIndexResponse {
        module,
        function,
        call_index,
    }))
}
