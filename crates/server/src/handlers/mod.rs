// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod accounts;
pub mod blocks;
pub mod common;
pub mod health;
pub mod runtime;
