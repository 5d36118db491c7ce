// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SCALE shapes of `System.Account` values across runtime generations.

use parity_scale_codec::{Decode, Encode};

/// Pre-providers `AccountInfo` with a single reference counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Decode, Encode)]
pub struct LegacyAccountInfo {
    pub nonce: u32,
    pub ref_count: u32,
    pub data: LegacyAccountData,
}

/// `AccountInfo` that added `providers` and `sufficients` after the reference counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Decode, Encode)]
pub struct RefCountWithProvidersAccountInfo {
    pub nonce: u32,
    pub ref_count: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: LegacyAccountData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Decode, Encode)]
pub struct LegacyAccountData {
    pub free: u128,
    pub reserved: u128,
    pub misc_frozen: u128,
    pub fee_frozen: u128,
}

/// Current `AccountInfo`, with a single `frozen` balance and `flags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Decode, Encode)]
pub struct FrozenAccountInfo {
    pub nonce: u32,
    pub consumers: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: FrozenAccountData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Decode, Encode)]
pub struct FrozenAccountData {
    pub free: u128,
    pub reserved: u128,
    pub frozen: u128,
    pub flags: u128,
}
