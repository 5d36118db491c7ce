// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// Chain identity of the loaded runtime, once one has been loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<u32>,
}

/// Handler for GET /health
///
/// Does not talk to the node; reports the runtime the client last saw.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.client.session().snapshot();

    Json(HealthResponse {
        status: "ok".to_string(),
        chain: snapshot.as_ref().map(|s| s.chain.clone()),
        spec_version: snapshot.map(|s| s.spec_version),
    })
}
