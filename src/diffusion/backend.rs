// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Capability interface for image generation backends

use anyhow::Result;
use async_trait::async_trait;

use crate::diffusion::request::{
    ImageToImageRequest, InpaintingRequest, TextToImageRequest, UpscaleRequest,
};
use crate::diffusion::types::GenerationResponse;

/// An image synthesis backend.
///
/// Handled failures are returned as [`ImageGenerationError`] inside the
/// `anyhow::Error`; anything else is reported to callers as `API_ERROR`.
///
/// [`ImageGenerationError`]: crate::diffusion::error::ImageGenerationError
#[async_trait]
pub trait ImageGenerationBackend: Send + Sync {
    async fn generate(&self, request: &TextToImageRequest) -> Result<GenerationResponse>;

    async fn transform(&self, request: &ImageToImageRequest) -> Result<GenerationResponse>;

    async fn inpaint(&self, request: &InpaintingRequest) -> Result<GenerationResponse>;

    async fn upscale(&self, request: &UpscaleRequest) -> Result<GenerationResponse>;

    /// Up to `limit` records owned by `user_id`, oldest first
    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<GenerationResponse>>;

    async fn get(&self, image_id: &str) -> Result<Option<GenerationResponse>>;

    /// Remove a record. Unknown ids are not an error.
    async fn delete(&self, image_id: &str) -> Result<()>;
}
