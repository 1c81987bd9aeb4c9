// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Record history, lookup and deletion endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::hello::MessageResponse;
use crate::api::http_server::AppState;
use crate::diffusion::service::DEFAULT_HISTORY_LIMIT;
use crate::diffusion::GenerationResponse;

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub user_id: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// GET /api/v1/images/history?user_id=&limit=
pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<GenerationResponse>>, ApiError> {
    let Query(query) = query?;
    let history = state.images.history(&query.user_id, query.limit).await?;
    Ok(Json(history))
}

/// GET /api/v1/images/{image_id}
pub async fn get_image_handler(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Result<Json<GenerationResponse>, ApiError> {
    Ok(Json(state.images.get(&image_id).await?))
}

/// DELETE /api/v1/images/{image_id} - Succeeds whether or not the id exists
pub async fn delete_image_handler(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.images.delete(&image_id).await?;
    Ok(Json(MessageResponse {
        message: "Image deleted successfully".to_string(),
    }))
}
