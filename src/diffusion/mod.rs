// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Mock image generation with prompt filtering and style enhancement

pub mod backend;
pub mod content_filter;
pub mod error;
pub mod mock;
pub mod prompt_optimizer;
pub mod request;
pub mod safety;
pub mod service;
pub mod types;

pub use backend::ImageGenerationBackend;
pub use content_filter::{AllowAllImages, ContentFilter, ImageModeration};
pub use error::{ErrorCode, ImageGenerationError, ValidationError};
pub use mock::{MockBackendConfig, MockImageBackend};
pub use prompt_optimizer::{PromptOptimizer, PromptValidation};
pub use request::{
    GenerationRequest, ImageToImageRequest, InpaintingRequest, TextToImageRequest, UpscaleRequest,
};
pub use safety::{ContentCategory, ContentCheck, FilterConfig};
pub use service::{EnhancedPrompt, ImageGenerationService, PromptReport};
pub use types::{
    AspectRatio, GenerationResponse, ImageMetadata, MaskMode, PresetSize, StylePreset,
    UpscaleModel, PRESET_SIZES,
};
