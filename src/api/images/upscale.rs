// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::diffusion::{GenerationResponse, UpscaleRequest};

/// POST /api/v1/images/upscale - Upscale a stored image by 2x or 4x
pub async fn upscale_image_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpscaleRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let Json(request) = payload?;
    debug!(
        "Upscale request received: image_id={}, factor={}",
        request.image_id, request.scale_factor
    );

    let response = state.images.submit(request.into()).await?;
    Ok(Json(response))
}
