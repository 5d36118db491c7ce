// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::ClientError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

/// Handler for GET /accounts/{address}/state
///
/// `address` may be SS58 with any prefix or a `0x` hex public key.
pub async fn get_account_state(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, ClientError> {
    let body = state.client.account_state(&address).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
