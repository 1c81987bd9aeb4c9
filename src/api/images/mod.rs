// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation API endpoints
//!
//! Mounted under `/api/v1/images`.

pub mod catalog;
pub mod edit;
pub mod generate;
pub mod history;
pub mod prompt;
pub mod upscale;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::http_server::AppState;

pub use catalog::{preset_sizes_handler, style_presets_handler, StyleOption};
pub use edit::{inpaint_image_handler, transform_image_handler, EditForm};
pub use generate::generate_image_handler;
pub use history::{delete_image_handler, get_image_handler, history_handler, HistoryQuery};
pub use prompt::{enhance_prompt_handler, validate_prompt_handler};
pub use upscale::upscale_image_handler;

/// Upper bound on request bodies, sized for two uploaded images
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(generate_image_handler))
        .route("/transform", post(transform_image_handler))
        .route("/inpaint", post(inpaint_image_handler))
        .route("/upscale", post(upscale_image_handler))
        .route("/history", get(history_handler))
        .route("/validate-prompt", post(validate_prompt_handler))
        .route("/enhance-prompt", post(enhance_prompt_handler))
        .route("/sizes", get(preset_sizes_handler))
        .route("/styles", get(style_presets_handler))
        .route(
            "/:image_id",
            get(get_image_handler).delete(delete_image_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
