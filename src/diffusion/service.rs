// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request orchestration: validation, content filtering, prompt enhancement
//! and delegation to the backend

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::diffusion::backend::ImageGenerationBackend;
use crate::diffusion::content_filter::ContentFilter;
use crate::diffusion::error::{ErrorCode, ImageGenerationError, ValidationError};
use crate::diffusion::prompt_optimizer::{PromptOptimizer, PromptValidation};
use crate::diffusion::request::{GenerationRequest, TextToImageRequest};
use crate::diffusion::safety::ContentCheck;
use crate::diffusion::types::{GenerationResponse, StylePreset};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Prompt review returned by the validate-prompt endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptReport {
    pub prompt: String,
    pub validation: PromptValidation,
    pub content_check: ContentCheck,
}

/// Enhancement preview returned by the enhance-prompt endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedPrompt {
    pub original: String,
    pub enhanced: String,
    pub suggested_negative: String,
}

/// Sequences the pipeline stages for every request type.
///
/// Text-to-image:  validate -> prompt filter -> style rewrite -> backend
/// Image-to-image: validate -> prompt filter -> image check -> backend
/// Inpainting:     validate -> prompt filter -> image + mask check -> backend
/// Upscale:        validate -> backend
pub struct ImageGenerationService {
    backend: Arc<dyn ImageGenerationBackend>,
    optimizer: PromptOptimizer,
    content_filter: ContentFilter,
}

impl ImageGenerationService {
    pub fn new(
        backend: Arc<dyn ImageGenerationBackend>,
        optimizer: PromptOptimizer,
        content_filter: ContentFilter,
    ) -> Self {
        Self {
            backend,
            optimizer,
            content_filter,
        }
    }

    pub fn optimizer(&self) -> &PromptOptimizer {
        &self.optimizer
    }

    pub fn content_filter(&self) -> &ContentFilter {
        &self.content_filter
    }

    pub async fn submit(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        debug!("Generation request received: kind={}", request.kind());
        if let Err(e) = request.validate() {
            warn!("Generation request failed validation: {}", e);
            return Err(e.into());
        }

        match request {
            GenerationRequest::TextToImage(mut request) => {
                self.screen_prompt(&request.prompt)?;
                self.apply_style(&mut request);
                self.backend.generate(&request).await
            }
            GenerationRequest::ImageToImage(request) => {
                self.screen_prompt(&request.params.prompt)?;
                self.screen_image("source_image", &request.source_image)
                    .await?;
                self.backend.transform(&request).await
            }
            GenerationRequest::Inpainting(request) => {
                self.screen_prompt(&request.params.prompt)?;
                self.screen_image("source_image", &request.source_image)
                    .await?;
                self.screen_image("mask_image", &request.mask_image).await?;
                self.backend.inpaint(&request).await
            }
            GenerationRequest::Upscale(request) => self.backend.upscale(&request).await,
        }
    }

    pub async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<GenerationResponse>> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::new("user_id", "user_id must not be empty").into());
        }
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(ValidationError::new(
                "limit",
                format!("limit must be between 1 and {}, got {}", MAX_HISTORY_LIMIT, limit),
            )
            .into());
        }
        self.backend.history(user_id, limit).await
    }

    pub async fn get(&self, image_id: &str) -> Result<GenerationResponse> {
        self.backend
            .get(image_id)
            .await?
            .ok_or_else(|| ImageGenerationError::image_not_found().into())
    }

    pub async fn delete(&self, image_id: &str) -> Result<()> {
        self.backend.delete(image_id).await
    }

    pub fn review_prompt(&self, prompt: &str) -> PromptReport {
        PromptReport {
            prompt: prompt.to_string(),
            validation: self.optimizer.validate_prompt(prompt),
            content_check: self.content_filter.check_prompt(prompt),
        }
    }

    pub fn preview_enhancement(&self, prompt: &str, style: Option<StylePreset>) -> EnhancedPrompt {
        EnhancedPrompt {
            original: prompt.to_string(),
            enhanced: self.optimizer.enhance_prompt(prompt, style),
            suggested_negative: self.optimizer.suggest_negative_prompt(prompt, style),
        }
    }

    fn screen_prompt(&self, prompt: &str) -> Result<(), ImageGenerationError> {
        let check = self.content_filter.check_prompt(prompt);
        if check.is_allowed {
            return Ok(());
        }
        let reason = check
            .reason
            .unwrap_or_else(|| "Prompt blocked by content filter".to_string());
        warn!("Generation prompt blocked: {}", reason);
        let mut err = ImageGenerationError::new(ErrorCode::NsfwContent, reason);
        if let Some(category) = check.category {
            err = err.with_details(serde_json::json!({ "category": category }));
        }
        Err(err)
    }

    async fn screen_image(&self, field: &str, image: &[u8]) -> Result<(), ImageGenerationError> {
        let check = self.content_filter.check_image(image).await;
        if check.is_allowed {
            return Ok(());
        }
        let reason = check
            .reason
            .unwrap_or_else(|| format!("{} blocked by image moderation", field));
        warn!("Generation image blocked: {}", reason);
        Err(ImageGenerationError::new(ErrorCode::NsfwContent, reason)
            .with_details(serde_json::json!({ "field": field, "category": check.category })))
    }

    /// Rewrite the prompt for the request's style and fill in a negative
    /// prompt when the caller left it empty.
    fn apply_style(&self, request: &mut TextToImageRequest) {
        let style = Some(request.style_preset);
        request.prompt = self.optimizer.enhance_prompt(&request.prompt, style);
        if request
            .negative_prompt
            .as_deref()
            .map_or(true, str::is_empty)
        {
            request.negative_prompt =
                Some(self.optimizer.suggest_negative_prompt(&request.prompt, style));
        }
    }
}
