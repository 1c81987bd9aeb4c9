// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content filter for prompts and uploaded images

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::diffusion::safety::{ContentCategory, ContentCheck, FilterConfig};

/// Blocked term entries: (term, associated category)
const BLOCKED_TERMS: &[(&str, ContentCategory)] = &[
    ("inappropriate", ContentCategory::Inappropriate),
    ("nsfw", ContentCategory::Inappropriate),
];

pub const BLOCKED_PROMPT_REASON: &str = "Prompt contains inappropriate content";

/// Moderation policy applied to uploaded images.
///
/// The default [`AllowAllImages`] accepts everything; a classifier-backed
/// policy can be swapped in through [`ContentFilter::with_image_policy`].
#[async_trait]
pub trait ImageModeration: Send + Sync {
    async fn check_image(&self, image_data: &[u8]) -> ContentCheck;
}

/// Policy that accepts every image
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAllImages;

#[async_trait]
impl ImageModeration for AllowAllImages {
    async fn check_image(&self, _image_data: &[u8]) -> ContentCheck {
        ContentCheck::allowed()
    }
}

/// Case-insensitive substring filter over prompts, plus the image policy
pub struct ContentFilter {
    config: FilterConfig,
    image_policy: Arc<dyn ImageModeration>,
}

impl ContentFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            image_policy: Arc::new(AllowAllImages),
        }
    }

    pub fn with_image_policy(mut self, policy: Arc<dyn ImageModeration>) -> Self {
        self.image_policy = policy;
        self
    }

    /// Check a prompt against the block-list. The first matching term wins.
    pub fn check_prompt(&self, prompt: &str) -> ContentCheck {
        let lower = prompt.to_lowercase();
        for &(term, category) in BLOCKED_TERMS {
            if lower.contains(term) {
                debug!("Prompt matched blocked term '{}'", term);
                return ContentCheck::blocked(BLOCKED_PROMPT_REASON, category);
            }
        }
        for term in &self.config.custom_blocked_terms {
            if !term.is_empty() && lower.contains(term.as_str()) {
                debug!("Prompt matched custom blocked term '{}'", term);
                return ContentCheck::blocked(BLOCKED_PROMPT_REASON, ContentCategory::Inappropriate);
            }
        }
        ContentCheck::allowed()
    }

    pub async fn check_image(&self, image_data: &[u8]) -> ContentCheck {
        self.image_policy.check_image(image_data).await
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}
