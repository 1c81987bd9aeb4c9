// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration from command line flags and environment variables

use clap::Parser;
use std::time::Duration;

use crate::diffusion::mock::{MockBackendConfig, DEFAULT_PLACEHOLDER_BASE_URL, MOCK_MODEL};
use crate::diffusion::safety::FilterConfig;

/// AI app backend server
#[derive(Parser, Debug, Clone)]
#[command(name = "ai-app-backend")]
#[command(version)]
#[command(about = "Hello-world API and mock image generation service", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Simulated latency of the mock backend in milliseconds
    #[arg(long, env = "MOCK_LATENCY_MS", default_value_t = 100)]
    pub mock_latency_ms: u64,

    /// Base URL of the placeholder images returned by the mock backend
    #[arg(long, env = "PLACEHOLDER_BASE_URL", default_value = DEFAULT_PLACEHOLDER_BASE_URL)]
    pub placeholder_base_url: String,

    /// Comma-separated terms blocked in prompts, in addition to the built-in list
    #[arg(long, env = "BLOCKED_TERMS", value_delimiter = ',')]
    pub blocked_terms: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }
        if self.placeholder_base_url.trim().is_empty() {
            return Err("Placeholder base URL must not be empty".to_string());
        }
        Ok(())
    }

    pub fn mock_backend_config(&self) -> MockBackendConfig {
        MockBackendConfig {
            latency: Duration::from_millis(self.mock_latency_ms),
            base_url: self.placeholder_base_url.clone(),
            model: MOCK_MODEL.to_string(),
        }
    }

    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig::with_terms(self.blocked_terms.iter().cloned())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            mock_latency_ms: 100,
            placeholder_base_url: DEFAULT_PLACEHOLDER_BASE_URL.to_string(),
            blocked_terms: Vec::new(),
        }
    }
}
