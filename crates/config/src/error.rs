// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to load env file '{path}': {message}")]
    EnvFileError { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    ValidateError(String),

    #[error("Invalid account layout entry '{entry}': {reason}")]
    InvalidAccountLayout { entry: String, reason: String },
}
