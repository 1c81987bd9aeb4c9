// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{hello, images};
use crate::config::ServerConfig;
use crate::diffusion::{
    ContentFilter, ImageGenerationBackend, ImageGenerationService, MockBackendConfig,
    MockImageBackend, PromptOptimizer,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub images: Arc<ImageGenerationService>,
}

impl AppState {
    pub fn new(images: ImageGenerationService) -> Self {
        Self {
            images: Arc::new(images),
        }
    }

    /// Build the state around the mock backend described by `config`
    pub fn from_config(config: &ServerConfig) -> Self {
        let backend: Arc<dyn ImageGenerationBackend> =
            Arc::new(MockImageBackend::new(config.mock_backend_config()));
        Self::new(ImageGenerationService::new(
            backend,
            PromptOptimizer::new(),
            ContentFilter::new(config.filter_config()),
        ))
    }

    /// Mock backend with no simulated latency (for testing)
    pub fn new_for_test() -> Self {
        Self::with_backend(Arc::new(MockImageBackend::new(MockBackendConfig::instant())))
    }

    pub fn with_backend(backend: Arc<dyn ImageGenerationBackend>) -> Self {
        Self::new(ImageGenerationService::new(
            backend,
            PromptOptimizer::new(),
            ContentFilter::default(),
        ))
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello::root_handler))
        .route("/health", get(hello::health_handler))
        .nest("/api", hello::router())
        .nest("/api/v1/images", images::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = create_app(Arc::new(state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
