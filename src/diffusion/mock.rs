// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory mock backend that fabricates placeholder results

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::diffusion::backend::ImageGenerationBackend;
use crate::diffusion::error::{ErrorCode, ImageGenerationError};
use crate::diffusion::request::{
    ImageToImageRequest, InpaintingRequest, TextToImageRequest, UpscaleRequest,
};
use crate::diffusion::types::{GenerationResponse, ImageMetadata};

pub const MOCK_MODEL: &str = "mock-model-v1";
pub const DEFAULT_PLACEHOLDER_BASE_URL: &str = "https://placeholder.com";

/// Configuration for [`MockImageBackend`]
#[derive(Debug, Clone)]
pub struct MockBackendConfig {
    /// Simulated round-trip delay before each generation
    pub latency: Duration,
    /// Base of the fabricated image URLs
    pub base_url: String,
    pub model: String,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(100),
            base_url: DEFAULT_PLACEHOLDER_BASE_URL.to_string(),
            model: MOCK_MODEL.to_string(),
        }
    }
}

impl MockBackendConfig {
    /// No simulated latency (for testing)
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

struct StoredRecord {
    response: GenerationResponse,
    owner: Option<String>,
}

#[derive(Default)]
struct StoreState {
    records: HashMap<String, StoredRecord>,
    /// Per-user record ids in insertion order
    user_history: HashMap<String, Vec<String>>,
}

impl StoreState {
    fn insert(&mut self, response: GenerationResponse, owner: Option<String>) {
        let id = response.image_id.clone();
        if let Some(ref user) = owner {
            self.user_history
                .entry(user.clone())
                .or_default()
                .push(id.clone());
        }
        self.records.insert(id, StoredRecord { response, owner });
    }

    fn remove(&mut self, image_id: &str) -> bool {
        let Some(record) = self.records.remove(image_id) else {
            return false;
        };
        if let Some(owner) = record.owner {
            if let Some(ids) = self.user_history.get_mut(&owner) {
                ids.retain(|id| id != image_id);
                if ids.is_empty() {
                    self.user_history.remove(&owner);
                }
            }
        }
        true
    }
}

/// Mock image generation backend.
///
/// Records live in a single lock-protected map for the lifetime of the
/// backend; nothing is persisted.
pub struct MockImageBackend {
    config: MockBackendConfig,
    state: RwLock<StoreState>,
}

impl MockImageBackend {
    pub fn new(config: MockBackendConfig) -> Self {
        Self {
            config,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn placeholder_url(&self, width: u32, height: u32) -> String {
        format!(
            "{}/{}x{}",
            self.config.base_url.trim_end_matches('/'),
            width,
            height
        )
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    async fn store(&self, response: GenerationResponse, owner: Option<String>) -> GenerationResponse {
        self.state.write().await.insert(response.clone(), owner);
        response
    }
}

impl Default for MockImageBackend {
    fn default() -> Self {
        Self::new(MockBackendConfig::default())
    }
}

#[async_trait]
impl ImageGenerationBackend for MockImageBackend {
    async fn generate(&self, request: &TextToImageRequest) -> Result<GenerationResponse> {
        self.simulate_latency().await;

        let (width, height) = request.dimensions();
        let response = GenerationResponse {
            image_url: self.placeholder_url(width, height),
            image_id: Uuid::new_v4().to_string(),
            metadata: ImageMetadata {
                prompt: request.prompt.clone(),
                width,
                height,
                model: self.config.model.clone(),
                timestamp: Utc::now(),
                style_preset: Some(request.style_preset),
                seed: request.seed,
            },
        };

        info!(
            "Mock image generated: id={}, size={}x{}",
            response.image_id, width, height
        );
        Ok(self.store(response, request.user_id.clone()).await)
    }

    // The mock ignores the source image and mask; only the shared
    // parameters reach the generated record.
    async fn transform(&self, request: &ImageToImageRequest) -> Result<GenerationResponse> {
        self.generate(&request.params).await
    }

    async fn inpaint(&self, request: &InpaintingRequest) -> Result<GenerationResponse> {
        self.generate(&request.params).await
    }

    async fn upscale(&self, request: &UpscaleRequest) -> Result<GenerationResponse> {
        let mut state = self.state.write().await;
        let (original, owner) = match state.records.get(&request.image_id) {
            Some(record) => (record.response.metadata.clone(), record.owner.clone()),
            None => return Err(ImageGenerationError::image_not_found().into()),
        };

        let (width, height) = match (
            original.width.checked_mul(request.scale_factor),
            original.height.checked_mul(request.scale_factor),
        ) {
            (Some(width), Some(height)) => (width, height),
            _ => {
                return Err(ImageGenerationError::new(
                    ErrorCode::ProcessingError,
                    format!(
                        "Upscaled size of {}x{} by {}x exceeds the supported range",
                        original.width, original.height, request.scale_factor
                    ),
                )
                .into())
            }
        };
        let response = GenerationResponse {
            image_url: self.placeholder_url(width, height),
            image_id: Uuid::new_v4().to_string(),
            metadata: ImageMetadata {
                prompt: format!("Upscaled: {}", original.prompt),
                width,
                height,
                model: format!("upscale-{}", request.model.as_str()),
                timestamp: Utc::now(),
                style_preset: None,
                seed: None,
            },
        };

        info!(
            "Mock image upscaled: {} -> {} ({}x)",
            request.image_id, response.image_id, request.scale_factor
        );
        state.insert(response.clone(), owner);
        Ok(response)
    }

    async fn history(&self, user_id: &str, limit: usize) -> Result<Vec<GenerationResponse>> {
        let state = self.state.read().await;
        let records = state
            .user_history
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.records.get(id))
                    .take(limit)
                    .map(|record| record.response.clone())
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    async fn get(&self, image_id: &str) -> Result<Option<GenerationResponse>> {
        let state = self.state.read().await;
        Ok(state.records.get(image_id).map(|r| r.response.clone()))
    }

    async fn delete(&self, image_id: &str) -> Result<()> {
        let removed = self.state.write().await.remove(image_id);
        if removed {
            info!("Mock image deleted: {}", image_id);
        } else {
            debug!("Delete of unknown image id ignored: {}", image_id);
        }
        Ok(())
    }
}
