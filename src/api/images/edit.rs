// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image-to-image and inpainting endpoints (multipart uploads)

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::diffusion::{
    GenerationResponse, ImageToImageRequest, InpaintingRequest, MaskMode, StylePreset,
    TextToImageRequest,
};

/// Fields of a multipart upload, split into text values and file payloads
#[derive(Debug, Default)]
pub struct EditForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
}

impl EditForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if field.file_name().is_some() {
                let data = field.bytes().await?;
                form.files.insert(name, data.to_vec());
            } else {
                let text = field.text().await?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    /// Non-empty text value of a field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn required_text(&self, name: &str) -> Result<String, ApiError> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| ApiError::validation(name, format!("{} is required", name)))
    }

    pub fn parse<T>(&self, name: &str) -> Result<Option<T>, ApiError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|e| ApiError::validation(name, format!("invalid {}: {}", name, e))),
        }
    }

    /// Take an uploaded file. A plain text field of the same name is accepted
    /// as the payload too.
    pub fn take_file(&mut self, name: &str) -> Result<Vec<u8>, ApiError> {
        if let Some(data) = self.files.remove(name) {
            return Ok(data);
        }
        self.fields
            .remove(name)
            .map(String::into_bytes)
            .ok_or_else(|| ApiError::validation(name, format!("{} file is required", name)))
    }

    fn base_params(&self) -> Result<TextToImageRequest, ApiError> {
        let mut params = TextToImageRequest::new(self.required_text("prompt")?);
        params.negative_prompt = self.text("negative_prompt").map(str::to_string);
        if let Some(style) = self.parse::<StylePreset>("style_preset")? {
            params.style_preset = style;
        }
        params.seed = self.parse("seed")?;
        params.user_id = self.text("user_id").map(str::to_string);
        Ok(params)
    }
}

/// POST /api/v1/images/transform - Transform an uploaded image (img2img)
pub async fn transform_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<GenerationResponse>, ApiError> {
    let mut form = EditForm::read(multipart).await?;
    let params = form.base_params()?;
    let source_image = form.take_file("source_image")?;
    debug!(
        "Transform request received: prompt_len={}, source_bytes={}",
        params.prompt.len(),
        source_image.len()
    );

    let mut request = ImageToImageRequest::new(params, source_image);
    if let Some(strength) = form.parse::<f32>("strength")? {
        request.strength = strength;
    }
    if let Some(preserve) = form.parse::<bool>("preserve_original")? {
        request.preserve_original = preserve;
    }

    let response = state.images.submit(request.into()).await?;
    Ok(Json(response))
}

/// POST /api/v1/images/inpaint - Repaint the masked region of an uploaded image
pub async fn inpaint_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<GenerationResponse>, ApiError> {
    let mut form = EditForm::read(multipart).await?;
    let params = form.base_params()?;
    let source_image = form.take_file("source_image")?;
    let mask_image = form.take_file("mask_image")?;
    debug!(
        "Inpaint request received: prompt_len={}, source_bytes={}, mask_bytes={}",
        params.prompt.len(),
        source_image.len(),
        mask_image.len()
    );

    let mut request = InpaintingRequest::new(params, source_image, mask_image);
    if let Some(strength) = form.parse::<f32>("strength")? {
        request.strength = strength;
    }
    if let Some(mask_blur) = form.parse::<u32>("mask_blur")? {
        request.mask_blur = mask_blur;
    }
    if let Some(mask_mode) = form.parse::<MaskMode>("mask_mode")? {
        request.mask_mode = mask_mode;
    }

    let response = state.images.submit(request.into()).await?;
    Ok(Json(response))
}
