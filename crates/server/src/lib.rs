// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod accounts;
pub mod app;
pub mod blocks;
pub mod client;
pub mod codec;
pub mod consts;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod rpc;
pub mod runtime;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test_fixtures;

pub use client::{ChainClient, ClientOptions, Collaborators};
pub use error::ClientError;
