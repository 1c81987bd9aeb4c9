// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::multipart::MultipartError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::error;

use crate::diffusion::error::{ErrorCode, ImageGenerationError, ValidationError};

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Malformed or out-of-range input, rejected before any processing
    Validation(ValidationError),
    /// Classified failure from the generation pipeline
    Generation(ImageGenerationError),
    /// Anything unclassified
    Internal(String),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(ValidationError::new(field, message))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(e) => ErrorResponse {
                error: VALIDATION_ERROR.to_string(),
                message: e.message.clone(),
                details: Some(serde_json::json!({ "field": e.field })),
            },
            ApiError::Generation(e) => ErrorResponse {
                error: e.code.as_str().to_string(),
                message: e.message.clone(),
                details: e.details.clone(),
            },
            ApiError::Internal(msg) => ErrorResponse {
                error: ErrorCode::ApiError.as_str().to_string(),
                message: msg.clone(),
                details: None,
            },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => {
                write!(f, "Validation error for {}: {}", e.field, e.message)
            }
            ApiError::Generation(e) => write!(f, "{}: {}", e.code, e.message),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<ImageGenerationError> for ApiError {
    fn from(e: ImageGenerationError) -> Self {
        ApiError::Generation(e)
    }
}

/// Classify a pipeline failure by the typed error it carries
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ValidationError>() {
            Ok(e) => return ApiError::Validation(e),
            Err(err) => err,
        };
        match err.downcast::<ImageGenerationError>() {
            Ok(e) => ApiError::Generation(e),
            Err(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation("query", rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::validation("multipart", e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}
