// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error taxonomy shared by the runtime session, the codecs and the block pipeline.

use thiserror::Error;

/// The node could not be reached or answered with something unusable.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("RPC call '{method}' failed: {message}")]
    Rpc { method: String, message: String },

    #[error("RPC call '{method}' returned an empty result")]
    EmptyResult { method: String },

    #[error("RPC call '{method}' returned an unexpected payload: {message}")]
    UnexpectedPayload { method: String, message: String },
}

impl TransportError {
    pub fn empty(method: &str) -> Self {
        Self::EmptyResult {
            method: method.to_string(),
        }
    }

    pub fn unexpected(method: &str, message: impl Into<String>) -> Self {
        Self::UnexpectedPayload {
            method: method.to_string(),
            message: message.into(),
        }
    }
}

/// Runtime metadata bytes could not be turned into a usable schema.
#[derive(Debug, Error)]
pub enum SchemaParseError {
    #[error("Metadata is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Failed to decode metadata: {0}")]
    Decode(#[from] parity_scale_codec::Error),

    #[error("Metadata magic number mismatch")]
    InvalidMagic,

    #[error("Unsupported metadata version V{0}; only V14 and V15 are supported")]
    UnsupportedVersion(u32),

    #[error("Metadata is missing the extrinsic '{0}' type")]
    MissingExtrinsicType(&'static str),

    #[error("Metadata type {0} is not in the registry")]
    UnknownType(u32),
}

/// Binary SCALE data (or its hex envelope) did not match the expected layout.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("SCALE decoding failed: {0}")]
    Scale(#[from] parity_scale_codec::Error),

    #[error("Failed to decode {what} with type {type_id}: {reason}")]
    Type {
        what: &'static str,
        type_id: u32,
        reason: String,
    },

    #[error("Malformed extrinsic: {0}")]
    Extrinsic(String),

    #[error("{remaining} bytes left over after decoding {what}")]
    TrailingBytes { what: &'static str, remaining: usize },

    #[error("Unexpected shape for {0}")]
    UnexpectedShape(String),
}

/// A textual address could not be turned into a public key.
#[derive(Debug, Error)]
pub enum AddressFormatError {
    #[error("Invalid SS58 address '{address}': {reason}")]
    InvalidSs58 { address: String, reason: String },

    #[error("Invalid hex public key '{0}': expected 32 bytes")]
    InvalidPublicKey(String),
}

/// A storage key could not be derived from the metadata.
#[derive(Debug, Error)]
pub enum KeyDerivationError {
    #[error("Pallet '{0}' has no storage")]
    UnknownPallet(String),

    #[error("Storage item '{pallet}.{item}' not found")]
    UnknownItem { pallet: String, item: String },

    #[error("Storage item '{pallet}.{item}' expects {expected} key(s), got {got}")]
    KeyCountMismatch {
        pallet: String,
        item: String,
        expected: usize,
        got: usize,
    },
}

/// A lookup target does not exist.
#[derive(Debug, Error)]
pub enum NotFoundError {
    #[error("Call '{module}.{function}' not found in metadata")]
    Call { module: String, function: String },

    #[error("Runtime metadata has not been loaded yet")]
    Metadata,
}

/// Everything a `ChainClient` operation can fail with.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    SchemaParse(#[from] SchemaParseError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    AddressFormat(#[from] AddressFormatError),

    #[error(transparent)]
    KeyDerivation(#[from] KeyDerivationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}
