// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::ClientError;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

impl ClientError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClientError::NotFound(_) => StatusCode::NOT_FOUND,
            ClientError::AddressFormat(_) => StatusCode::BAD_REQUEST,
            ClientError::Transport(_) => StatusCode::BAD_GATEWAY,
            ClientError::SchemaParse(_)
            | ClientError::Decode(_)
            | ClientError::KeyDerivation(_)
            | ClientError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ClientError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
