// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod decoder;
pub mod layout;

pub use config::AccountLayoutName as AccountLayout;
pub use decoder::{AccountBalances, AccountState, AccountStateDecoder};
