// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::logging::http_logger_middleware;
use crate::routes::{self, API_VERSION};
use crate::state::AppState;
use axum::{Router, middleware, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_app(state: AppState) -> Router {
    let registry = &state.route_registry;

    let v1 = Router::new()
        .merge(routes::health::health_routes(registry))
        .merge(routes::blocks::blocks_routes(registry))
        .merge(routes::accounts::accounts_routes(registry))
        .merge(routes::runtime::runtime_routes(registry));

    Router::new()
        .route("/", get(routes::root::root_handler))
        .nest(API_VERSION, v1)
        .layer(middleware::from_fn(http_logger_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
