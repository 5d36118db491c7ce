// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod metadata;
pub mod session;

pub use metadata::{
    FrameMetadataParser, MetadataParser, PalletInfo, RuntimeMetadataHandle, StorageEntryKind,
    StorageHasher,
};
pub use session::{RuntimeSession, RuntimeSnapshot, RuntimeVersion};
