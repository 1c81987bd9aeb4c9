// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation request schemas and structural validation
//!
//! All variants share [`TextToImageRequest`] as their base parameters; the
//! image-to-image and inpainting variants add their payloads alongside it
//! rather than extending one another.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::types::{AspectRatio, MaskMode, StylePreset, UpscaleModel};

pub const MAX_PROMPT_CHARS: usize = 1000;
pub const MIN_DIMENSION: u32 = 64;
pub const MAX_DIMENSION: u32 = 2048;
pub const DIMENSION_STEP: u32 = 64;
pub const MAX_STEPS: u32 = 150;
pub const MAX_MASK_BLUR: u32 = 64;
pub const DEFAULT_STEPS: u32 = 30;
pub const DEFAULT_STRENGTH: f32 = 0.7;
pub const DEFAULT_DIMENSIONS: (u32, u32) = (1024, 1024);

fn default_steps() -> u32 {
    DEFAULT_STEPS
}

fn default_scale_factor() -> u32 {
    2
}

/// Text-to-image request; also the base parameters of every other variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToImageRequest {
    /// Text prompt describing the desired image
    pub prompt: String,

    /// Negative prompt to guide away from
    #[serde(default, alias = "negativePrompt")]
    pub negative_prompt: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    /// Used only for axes without an explicit dimension
    #[serde(default, alias = "aspectRatio")]
    pub aspect_ratio: Option<AspectRatio>,

    #[serde(default, alias = "stylePreset")]
    pub style_preset: StylePreset,

    /// Random seed for reproducibility
    #[serde(default)]
    pub seed: Option<i64>,

    /// Number of inference steps
    #[serde(default = "default_steps")]
    pub steps: u32,

    /// Owner of the generated record, used for history lookups
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

impl TextToImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            negative_prompt: None,
            width: None,
            height: None,
            aspect_ratio: None,
            style_preset: StylePreset::default(),
            seed: None,
            steps: DEFAULT_STEPS,
            user_id: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_style(mut self, style: StylePreset) -> Self {
        self.style_preset = style;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Resolve the output size. Explicit width/height win over the aspect
    /// ratio; an axis left unset falls back to the ratio, then to 1024.
    pub fn dimensions(&self) -> (u32, u32) {
        let (base_width, base_height) = self
            .aspect_ratio
            .map(|ratio| ratio.dimensions())
            .unwrap_or(DEFAULT_DIMENSIONS);
        (
            self.width.unwrap_or(base_width),
            self.height.unwrap_or(base_height),
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::new("prompt", "prompt must not be empty"));
        }
        if self.prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(ValidationError::new(
                "prompt",
                format!("prompt must be at most {} characters", MAX_PROMPT_CHARS),
            ));
        }
        if let Some(ref negative) = self.negative_prompt {
            if negative.chars().count() > MAX_PROMPT_CHARS {
                return Err(ValidationError::new(
                    "negative_prompt",
                    format!(
                        "negative_prompt must be at most {} characters",
                        MAX_PROMPT_CHARS
                    ),
                ));
            }
        }
        if let Some(width) = self.width {
            validate_dimension("width", width)?;
        }
        if let Some(height) = self.height {
            validate_dimension("height", height)?;
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ValidationError::new(
                "steps",
                format!("steps must be between 1 and {}, got {}", MAX_STEPS, self.steps),
            ));
        }
        Ok(())
    }
}

fn validate_dimension(field: &str, value: u32) -> Result<(), ValidationError> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
        return Err(ValidationError::new(
            field,
            format!(
                "{} must be between {} and {}, got {}",
                field, MIN_DIMENSION, MAX_DIMENSION, value
            ),
        ));
    }
    if value % DIMENSION_STEP != 0 {
        return Err(ValidationError::new(
            field,
            "Dimensions must be multiples of 64",
        ));
    }
    Ok(())
}

fn validate_strength(strength: f32) -> Result<(), ValidationError> {
    if !strength.is_finite() || !(0.0..=1.0).contains(&strength) {
        return Err(ValidationError::new(
            "strength",
            format!("strength must be between 0.0 and 1.0, got {}", strength),
        ));
    }
    Ok(())
}

fn validate_payload(field: &str, payload: &[u8]) -> Result<(), ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} must not be empty", field),
        ));
    }
    Ok(())
}

/// Image-to-image request: base parameters plus a source image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageToImageRequest {
    pub params: TextToImageRequest,
    /// Encoded source image, passed through opaquely
    pub source_image: Vec<u8>,
    pub strength: f32,
    pub preserve_original: bool,
}

impl ImageToImageRequest {
    pub fn new(params: TextToImageRequest, source_image: Vec<u8>) -> Self {
        Self {
            params,
            source_image,
            strength: DEFAULT_STRENGTH,
            preserve_original: false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.params.validate()?;
        validate_payload("source_image", &self.source_image)?;
        validate_strength(self.strength)
    }
}

/// Inpainting request: base parameters plus source image and mask
#[derive(Debug, Clone, PartialEq)]
pub struct InpaintingRequest {
    pub params: TextToImageRequest,
    pub source_image: Vec<u8>,
    pub mask_image: Vec<u8>,
    pub strength: f32,
    pub mask_blur: u32,
    pub mask_mode: MaskMode,
}

impl InpaintingRequest {
    pub fn new(params: TextToImageRequest, source_image: Vec<u8>, mask_image: Vec<u8>) -> Self {
        Self {
            params,
            source_image,
            mask_image,
            strength: DEFAULT_STRENGTH,
            mask_blur: 0,
            mask_mode: MaskMode::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.params.validate()?;
        validate_payload("source_image", &self.source_image)?;
        validate_payload("mask_image", &self.mask_image)?;
        validate_strength(self.strength)?;
        if self.mask_blur > MAX_MASK_BLUR {
            return Err(ValidationError::new(
                "mask_blur",
                format!(
                    "mask_blur must be between 0 and {}, got {}",
                    MAX_MASK_BLUR, self.mask_blur
                ),
            ));
        }
        Ok(())
    }
}

/// Request to upscale a previously generated image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpscaleRequest {
    #[serde(alias = "imageId")]
    pub image_id: String,

    #[serde(default = "default_scale_factor", alias = "scaleFactor")]
    pub scale_factor: u32,

    #[serde(default)]
    pub model: UpscaleModel,
}

impl UpscaleRequest {
    pub fn new(image_id: impl Into<String>, scale_factor: u32) -> Self {
        Self {
            image_id: image_id.into(),
            scale_factor,
            model: UpscaleModel::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.image_id.trim().is_empty() {
            return Err(ValidationError::new("image_id", "image_id must not be empty"));
        }
        if !matches!(self.scale_factor, 2 | 4) {
            return Err(ValidationError::new(
                "scale_factor",
                format!("scale_factor must be 2 or 4, got {}", self.scale_factor),
            ));
        }
        Ok(())
    }
}

/// Any inbound generation request
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    TextToImage(TextToImageRequest),
    ImageToImage(ImageToImageRequest),
    Inpainting(InpaintingRequest),
    Upscale(UpscaleRequest),
}

impl GenerationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::TextToImage(_) => "text-to-image",
            GenerationRequest::ImageToImage(_) => "image-to-image",
            GenerationRequest::Inpainting(_) => "inpainting",
            GenerationRequest::Upscale(_) => "upscale",
        }
    }

    /// Shared base parameters; upscale requests carry none
    pub fn params(&self) -> Option<&TextToImageRequest> {
        match self {
            GenerationRequest::TextToImage(r) => Some(r),
            GenerationRequest::ImageToImage(r) => Some(&r.params),
            GenerationRequest::Inpainting(r) => Some(&r.params),
            GenerationRequest::Upscale(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            GenerationRequest::TextToImage(r) => r.validate(),
            GenerationRequest::ImageToImage(r) => r.validate(),
            GenerationRequest::Inpainting(r) => r.validate(),
            GenerationRequest::Upscale(r) => r.validate(),
        }
    }
}

impl From<TextToImageRequest> for GenerationRequest {
    fn from(request: TextToImageRequest) -> Self {
        GenerationRequest::TextToImage(request)
    }
}

impl From<ImageToImageRequest> for GenerationRequest {
    fn from(request: ImageToImageRequest) -> Self {
        GenerationRequest::ImageToImage(request)
    }
}

impl From<InpaintingRequest> for GenerationRequest {
    fn from(request: InpaintingRequest) -> Self {
        GenerationRequest::Inpainting(request)
    }
}

impl From<UpscaleRequest> for GenerationRequest {
    fn from(request: UpscaleRequest) -> Self {
        GenerationRequest::Upscale(request)
    }
}
