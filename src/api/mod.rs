// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod hello;
pub mod http_server;
pub mod images;

pub use errors::{ApiError, ErrorResponse};
pub use hello::{HealthResponse, MessageResponse};
pub use http_server::{create_app, start_server, AppState};
