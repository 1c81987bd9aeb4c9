// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Greeting and liveness endpoints

use axum::{extract::Path, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::http_server::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Routes mounted under `/api`
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hello", get(hello_handler))
        .route("/hello/:name", get(hello_name_handler))
}

/// GET /
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World! AI App Backend is running.".to_string(),
    })
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Backend is running successfully".to_string(),
    })
}

/// GET /api/hello
pub async fn hello_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World from AI App Backend API!".to_string(),
    })
}

/// GET /api/hello/{name}
pub async fn hello_name_handler(Path(name): Path<String>) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: format!("Hello {} from AI App Backend API!", name),
    })
}
