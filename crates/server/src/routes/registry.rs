// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tracks every route the router serves so `/` can list them.

use axum::{Router, routing::MethodRouter};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Prefix every versioned route is nested under.
pub const API_VERSION: &str = "/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// Full path pattern, e.g. `/v1/blocks/{height}`.
    pub path: String,
    pub method: String,
}

#[derive(Clone, Default)]
pub struct RouteRegistry(Arc<RwLock<Vec<RouteInfo>>>);

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, path: &str, method: &str) {
        let info = RouteInfo {
            path: path.to_string(),
            method: method.to_string(),
        };
        match self.0.write() {
            Ok(mut routes) => routes.push(info),
            Err(poisoned) => poisoned.into_inner().push(info),
        }
    }

    pub fn routes(&self) -> Vec<RouteInfo> {
        match self.0.read() {
            Ok(routes) => routes.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

pub trait RegisterRoute<S: Clone + Send + Sync + 'static> {
    /// Route `path` on this (to be nested) router and record it as
    /// `prefix` + `path` in `registry`.
    fn route_registered(
        self,
        registry: &RouteRegistry,
        prefix: &str,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self;
}

impl<S: Clone + Send + Sync + 'static> RegisterRoute<S> for Router<S> {
    fn route_registered(
        self,
        registry: &RouteRegistry,
        prefix: &str,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self {
        registry.add(&format!("{prefix}{path}"), method);
        self.route(path, handler)
    }
}
