// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Content check types and configuration for the image generation pipeline

use serde::{Deserialize, Serialize};

/// Categories of rejected content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Inappropriate,
}

/// Result of a content check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCheck {
    pub is_allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ContentCategory>,
}

impl ContentCheck {
    pub fn allowed() -> Self {
        Self {
            is_allowed: true,
            reason: None,
            category: None,
        }
    }

    pub fn blocked(reason: impl Into<String>, category: ContentCategory) -> Self {
        Self {
            is_allowed: false,
            reason: Some(reason.into()),
            category: Some(category),
        }
    }
}

/// Configuration for the content filter
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Extra terms blocked on top of the built-in list
    pub custom_blocked_terms: Vec<String>,
}

impl FilterConfig {
    pub fn with_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            custom_blocked_terms: terms
                .into_iter()
                .map(Into::into)
                .map(|t: String| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }
}
