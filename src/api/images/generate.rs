// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-image endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::diffusion::{GenerationResponse, TextToImageRequest};

/// POST /api/v1/images/generate - Generate an image from a text prompt
///
/// Pipeline:
/// 1. Validate request (422 on failure)
/// 2. Content filter on the prompt (400 NSFW_CONTENT)
/// 3. Style enhancement of prompt and negative prompt
/// 4. Generate and store the record
pub async fn generate_image_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextToImageRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let Json(request) = payload?;
    debug!(
        "Image generation request received: prompt_len={}, style={}",
        request.prompt.len(),
        request.style_preset
    );

    let response = state.images.submit(request.into()).await?;
    Ok(Json(response))
}
