use crate::core::config::AppConfig;
use crate::core::price::SeriesProvider;
use crate::providers::build_provider;
use anyhow::Result;
use std::sync::Arc;

/// Shared application state, passed to all route handlers via `axum::extract::State`.
pub struct AppState {
    pub config: AppConfig,
    /// Cached provider; the cache is shared by every request.
    pub provider: Arc<dyn SeriesProvider>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        let provider = build_provider(&config)?;
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: AppConfig, provider: Arc<dyn SeriesProvider>) -> Arc<Self> {
        Arc::new(Self { config, provider })
    }
}
