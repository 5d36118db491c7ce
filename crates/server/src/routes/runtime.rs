// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::handlers::runtime;
use crate::routes::{API_VERSION, RegisterRoute, RouteRegistry};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn runtime_routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(
            registry,
            API_VERSION,
            "/runtime/genesis",
            "get",
            get(runtime::get_genesis),
        )
        .route_registered(
            registry,
            API_VERSION,
            "/runtime/call-index/{module}/{function}",
            "get",
            get(runtime::get_call_index),
        )
}
