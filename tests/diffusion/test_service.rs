// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the generation pipeline: validation, filtering, enhancement

use ai_app_backend::diffusion::prompt_optimizer::BASE_NEGATIVE_PROMPT;
use ai_app_backend::diffusion::{
    ContentCategory, ContentCheck, ContentFilter, ErrorCode, GenerationResponse,
    ImageGenerationBackend, ImageGenerationError, ImageGenerationService, ImageModeration,
    ImageToImageRequest, InpaintingRequest, MockBackendConfig, MockImageBackend,
    PromptOptimizer, StylePreset, TextToImageRequest, UpscaleRequest, ValidationError,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;

fn service() -> ImageGenerationService {
    service_with_filter(ContentFilter::default())
}

fn service_with_filter(filter: ContentFilter) -> ImageGenerationService {
    ImageGenerationService::new(
        Arc::new(MockImageBackend::new(MockBackendConfig::instant())),
        PromptOptimizer::new(),
        filter,
    )
}

#[tokio::test]
async fn test_plain_request_keeps_prompt() {
    let service = service();
    let response = service
        .submit(TextToImageRequest::new("a lighthouse").into())
        .await
        .unwrap();
    assert_eq!(response.metadata.prompt, "a lighthouse");
    assert_eq!(response.metadata.style_preset, Some(StylePreset::None));
}

#[tokio::test]
async fn test_style_rewrites_stored_prompt() {
    let service = service();
    let request = TextToImageRequest::new("a cat").with_style(StylePreset::Anime);
    let response = service.submit(request.into()).await.unwrap();
    assert_eq!(
        response.metadata.prompt,
        "anime style, manga art, a cat, detailed anime illustration"
    );
}

/// Backend that records the last text-to-image request it was handed
#[derive(Default)]
struct RecordingBackend {
    inner: MockImageBackend,
    last: tokio::sync::Mutex<Option<TextToImageRequest>>,
}

#[async_trait]
impl ImageGenerationBackend for RecordingBackend {
    async fn generate(&self, request: &TextToImageRequest) -> Result<GenerationResponse> {
        *self.last.lock().await = Some(request.clone());
        self.inner.generate(request).await
    }
    async fn transform(&self, request: &ImageToImageRequest) -> Result<GenerationResponse> {
        self.inner.transform(request).await
    }
    async fn inpaint(&self, request: &InpaintingRequest) -> Result<GenerationResponse> {
        self.inner.inpaint(request).await
    }
    async fn upscale(&self, request: &UpscaleRequest) -> Result<GenerationResponse> {
        self.inner.upscale(request).await
    }
    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<GenerationResponse>> {
        self.inner.history(user_id, limit).await
    }
    async fn get(&self, image_id: &str) -> Result<Option<GenerationResponse>> {
        self.inner.get(image_id).await
    }
    async fn delete(&self, image_id: &str) -> Result<()> {
        self.inner.delete(image_id).await
    }
}

#[tokio::test]
async fn test_negative_prompt_filled_only_when_missing() {
    let backend = Arc::new(RecordingBackend {
        inner: MockImageBackend::new(MockBackendConfig::instant()),
        ..Default::default()
    });
    let service = ImageGenerationService::new(
        backend.clone(),
        PromptOptimizer::new(),
        ContentFilter::default(),
    );

    service
        .submit(TextToImageRequest::new("a cat").into())
        .await
        .unwrap();
    let seen = backend.last.lock().await.clone().unwrap();
    assert_eq!(seen.negative_prompt.as_deref(), Some(BASE_NEGATIVE_PROMPT));

    let request = TextToImageRequest::new("a cat").with_style(StylePreset::Photographic);
    service.submit(request.into()).await.unwrap();
    let seen = backend.last.lock().await.clone().unwrap();
    assert_eq!(
        seen.negative_prompt.as_deref(),
        Some("low quality, blurry, pixelated, distorted, cartoon, illustration, painting")
    );

    let mut request = TextToImageRequest::new("a cat").with_style(StylePreset::Anime);
    request.negative_prompt = Some("dogs".to_string());
    service.submit(request.into()).await.unwrap();
    let seen = backend.last.lock().await.clone().unwrap();
    assert_eq!(seen.negative_prompt.as_deref(), Some("dogs"));
}

#[tokio::test]
async fn test_validation_failure_carries_validation_error() {
    let err = service()
        .submit(TextToImageRequest::new("a cat").with_dimensions(1000, 1024).into())
        .await
        .unwrap_err();
    let err = err.downcast::<ValidationError>().unwrap();
    assert!(err.message.contains("multiples of 64"));
}

#[tokio::test]
async fn test_blocked_prompt_is_nsfw_content() {
    let err = service()
        .submit(TextToImageRequest::new("something inappropriate").into())
        .await
        .unwrap_err();
    let err = err.downcast::<ImageGenerationError>().unwrap();
    assert_eq!(err.code, ErrorCode::NsfwContent);
    assert_eq!(err.details.unwrap()["category"], "inappropriate");
}

#[tokio::test]
async fn test_edit_requests_are_filtered_too() {
    let service = service();
    let params = TextToImageRequest::new("nsfw edit");

    let err = service
        .submit(ImageToImageRequest::new(params.clone(), vec![1]).into())
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast::<ImageGenerationError>().unwrap().code,
        ErrorCode::NsfwContent
    );

    let err = service
        .submit(InpaintingRequest::new(params, vec![1], vec![1]).into())
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast::<ImageGenerationError>().unwrap().code,
        ErrorCode::NsfwContent
    );
}

#[tokio::test]
async fn test_edit_requests_are_not_style_enhanced() {
    let service = service();
    let params = TextToImageRequest::new("a harbour").with_style(StylePreset::Anime);
    let response = service
        .submit(ImageToImageRequest::new(params, vec![1]).into())
        .await
        .unwrap();
    assert_eq!(response.metadata.prompt, "a harbour");
}

struct RejectMasks;

#[async_trait]
impl ImageModeration for RejectMasks {
    async fn check_image(&self, image_data: &[u8]) -> ContentCheck {
        if image_data == b"bad" {
            ContentCheck::blocked("flagged image", ContentCategory::Inappropriate)
        } else {
            ContentCheck::allowed()
        }
    }
}

#[tokio::test]
async fn test_image_moderation_rejects_uploads() {
    let service =
        service_with_filter(ContentFilter::default().with_image_policy(Arc::new(RejectMasks)));
    let params = TextToImageRequest::new("a harbour");

    let err = service
        .submit(InpaintingRequest::new(params.clone(), b"ok".to_vec(), b"bad".to_vec()).into())
        .await
        .unwrap_err();
    let err = err.downcast::<ImageGenerationError>().unwrap();
    assert_eq!(err.code, ErrorCode::NsfwContent);
    assert_eq!(err.message, "flagged image");
    assert_eq!(err.details.unwrap()["field"], "mask_image");

    assert!(service
        .submit(ImageToImageRequest::new(params, b"ok".to_vec()).into())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_upscale_through_service() {
    let service = service();
    let original = service
        .submit(TextToImageRequest::new("a cat").with_dimensions(512, 512).into())
        .await
        .unwrap();
    let upscaled = service
        .submit(UpscaleRequest::new(original.image_id.clone(), 2).into())
        .await
        .unwrap();
    assert_eq!(upscaled.metadata.width, 1024);
    assert_eq!(service.get(&original.image_id).await.unwrap(), original);
}

#[tokio::test]
async fn test_history_after_five_generations() {
    let service = service();
    for i in 0..5 {
        let request = TextToImageRequest::new(format!("scene {}", i)).with_user("user123");
        service.submit(request.into()).await.unwrap();
    }
    assert_eq!(service.history("user123", 3).await.unwrap().len(), 3);
    assert_eq!(service.history("user123", 10).await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_history_argument_validation() {
    let service = service();
    let err = service.history("", 10).await.unwrap_err();
    assert_eq!(err.downcast::<ValidationError>().unwrap().field, "user_id");

    for limit in [0, 101] {
        let err = service.history("user123", limit).await.unwrap_err();
        assert_eq!(err.downcast::<ValidationError>().unwrap().field, "limit");
    }
}

#[tokio::test]
async fn test_get_after_delete_is_invalid_image() {
    let service = service();
    let record = service
        .submit(TextToImageRequest::new("a cat").into())
        .await
        .unwrap();
    service.delete(&record.image_id).await.unwrap();

    let err = service.get(&record.image_id).await.unwrap_err();
    assert_eq!(
        err.downcast::<ImageGenerationError>().unwrap().code,
        ErrorCode::InvalidImage
    );
    service.delete(&record.image_id).await.unwrap();
}

struct FailingBackend;

#[async_trait]
impl ImageGenerationBackend for FailingBackend {
    async fn generate(&self, _request: &TextToImageRequest) -> Result<GenerationResponse> {
        Err(anyhow!("connection reset by peer"))
    }
    async fn transform(&self, _request: &ImageToImageRequest) -> Result<GenerationResponse> {
        Err(anyhow!("connection reset by peer"))
    }
    async fn inpaint(&self, _request: &InpaintingRequest) -> Result<GenerationResponse> {
        Err(anyhow!("connection reset by peer"))
    }
    async fn upscale(&self, _request: &UpscaleRequest) -> Result<GenerationResponse> {
        Err(anyhow!("connection reset by peer"))
    }
    async fn history(&self, _user_id: &str, _limit: usize) -> Result<Vec<GenerationResponse>> {
        Ok(Vec::new())
    }
    async fn get(&self, _image_id: &str) -> Result<Option<GenerationResponse>> {
        Ok(None)
    }
    async fn delete(&self, _image_id: &str) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_unclassified_backend_failure_passes_through() {
    let service = ImageGenerationService::new(
        Arc::new(FailingBackend),
        PromptOptimizer::new(),
        ContentFilter::default(),
    );
    let err = service
        .submit(TextToImageRequest::new("a cat").into())
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ImageGenerationError>().is_none());
    assert!(err.downcast_ref::<ValidationError>().is_none());
    assert_eq!(err.to_string(), "connection reset by peer");
}

#[test]
fn test_review_and_preview() {
    let service = service();

    let report = service.review_prompt("nsfw");
    assert!(!report.validation.is_valid);
    assert!(!report.content_check.is_allowed);

    let preview = service.preview_enhancement("a cat", Some(StylePreset::Cinematic));
    assert_eq!(preview.original, "a cat");
    assert!(preview.enhanced.starts_with("cinematic shot"));
    assert!(preview.suggested_negative.ends_with("cartoon, anime, illustration"));
}
