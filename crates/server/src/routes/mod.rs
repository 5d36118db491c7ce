// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod accounts;
pub mod blocks;
pub mod health;
pub mod registry;
pub mod root;
pub mod runtime;

pub use registry::{API_VERSION, RegisterRoute, RouteInfo, RouteRegistry};
