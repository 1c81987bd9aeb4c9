// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Static reference data: preset sizes and style presets

use axum::Json;
use serde::Serialize;

use crate::diffusion::{PresetSize, StylePreset, PRESET_SIZES};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOption {
    pub value: &'static str,
    pub name: String,
}

/// GET /api/v1/images/sizes
pub async fn preset_sizes_handler() -> Json<&'static [PresetSize]> {
    Json(PRESET_SIZES)
}

/// GET /api/v1/images/styles
pub async fn style_presets_handler() -> Json<Vec<StyleOption>> {
    Json(
        StylePreset::ALL
            .iter()
            .map(|style| StyleOption {
                value: style.as_str(),
                name: style.display_name(),
            })
            .collect(),
    )
}
