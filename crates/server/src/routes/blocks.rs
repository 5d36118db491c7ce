// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::handlers::blocks;
use crate::routes::{API_VERSION, RegisterRoute, RouteRegistry};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn blocks_routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(
            registry,
            API_VERSION,
            "/blocks/head/number",
            "get",
            get(blocks::get_block_number),
        )
        .route_registered(
            registry,
            API_VERSION,
            "/blocks/hash/{hash}",
            "get",
            get(blocks::get_block_by_hash),
        )
        .route_registered(
            registry,
            API_VERSION,
            "/blocks/{height}",
            "get",
            get(blocks::get_block),
        )
}
