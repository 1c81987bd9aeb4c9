// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the image generation pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable error kinds reported to API callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidPrompt,
    NsfwContent,
    RateLimit,
    InsufficientCredits,
    ApiError,
    InvalidImage,
    ProcessingError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidPrompt => "INVALID_PROMPT",
            ErrorCode::NsfwContent => "NSFW_CONTENT",
            ErrorCode::RateLimit => "RATE_LIMIT",
            ErrorCode::InsufficientCredits => "INSUFFICIENT_CREDITS",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::InvalidImage => "INVALID_IMAGE",
            ErrorCode::ProcessingError => "PROCESSING_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure raised by the generation pipeline.
///
/// Handled failures carry a stable [`ErrorCode`]; the HTTP layer echoes the
/// code back to the caller with status 400.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ImageGenerationError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ImageGenerationError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured detail to the error
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn image_not_found() -> Self {
        Self::new(ErrorCode::InvalidImage, "Image not found")
    }
}

/// Structural validation failure for an inbound request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
