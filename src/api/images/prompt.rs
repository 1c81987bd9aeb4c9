// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt review and enhancement preview endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::diffusion::{EnhancedPrompt, PromptReport, StylePreset};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatePromptQuery {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancePromptQuery {
    pub prompt: String,
    #[serde(default)]
    pub style_preset: Option<String>,
}

/// POST /api/v1/images/validate-prompt?prompt=
pub async fn validate_prompt_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ValidatePromptQuery>, QueryRejection>,
) -> Result<Json<PromptReport>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.images.review_prompt(&query.prompt)))
}

/// POST /api/v1/images/enhance-prompt?prompt=&style_preset=
///
/// Unrecognised style names leave the prompt unchanged.
pub async fn enhance_prompt_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EnhancePromptQuery>, QueryRejection>,
) -> Result<Json<EnhancedPrompt>, ApiError> {
    let Query(query) = query?;
    let style = query
        .style_preset
        .as_deref()
        .and_then(|s| s.parse::<StylePreset>().ok());
    Ok(Json(state.images.preview_enhancement(&query.prompt, style)))
}
