// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

macro_rules! log_request {
    ($level:ident, $method:expr, $path:expr, $status:expr, $elapsed:expr) => {
        tracing::$level!(
            target: "http",
            method = %$method,
            path = %$path,
            status = $status,
            duration_ms = $elapsed,
            "{} {} {} {}ms",
            $method,
            $path,
            $status,
            $elapsed
        )
    };
}

/// Logs one line per request under the `http` target: `GET /v1/blocks/12 200 45ms`.
///
/// Successful and redirected requests log at `debug`, client errors at `warn`
/// and everything else at `error`.
pub async fn http_logger_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = match req.uri().query() {
        Some(query) => format!("{}?{}", req.uri().path(), query),
        None => req.uri().path().to_string(),
    };
    let start = Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_millis();
    let status = response.status().as_u16();
    match status {
        200..=399 => log_request!(debug, method, path, status, elapsed),
        400..=499 => log_request!(warn, method, path, status, elapsed),
        _ => log_request!(error, method, path, status, elapsed),
    }

    response
}
