// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod transport;

pub use transport::{RpcTransport, Transport, request_hex_string};
