// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::blocks::BlockResponse;
use crate::error::ClientError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

/// Handler for GET /blocks/{height}
pub async fn get_block(
    State(state): State<AppState>,
    Path(height): Path<u64>,
) -> Result<Json<BlockResponse>, ClientError> {
    Ok(Json(state.client.block_by_height(height).await?))
}

/// Handler for GET /blocks/hash/{hash}
pub async fn get_block_by_hash(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<BlockResponse>, ClientError> {
    Ok(Json(state.client.block_by_hash(&hash).await?))
}

#[derive(Debug, Deserialize)]
pub struct BlockNumberQueryParams {
    /// Block to look up; the finalized head when absent.
    pub hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlockNumberResponse {
    pub number: u64,
}

/// Handler for GET /blocks/head/number
///
/// Accepts an optional `?hash=` to ask for a specific block instead.
pub async fn get_block_number(
    State(state): State<AppState>,
    Query(params): Query<BlockNumberQueryParams>,
) -> Result<Json<BlockNumberResponse>, ClientError> {
    let number = state.client.block_number(params.hash.as_deref()).await?;
    Ok(Json(BlockNumberResponse { number }))
}
