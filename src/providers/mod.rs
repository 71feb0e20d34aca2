pub mod caching;
pub mod yahoo_finance;

use crate::core::config::AppConfig;
use crate::core::price::{PriceSeries, SeriesProvider};
use crate::store::memory::MemoryCache;
use anyhow::Result;
use caching::{CachingSeriesProvider, SeriesCacheKey};
use std::sync::Arc;
use yahoo_finance::YahooFinanceProvider;

/// Yahoo provider behind the time-boxed series cache.
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn SeriesProvider>> {
    let yahoo = YahooFinanceProvider::new(&config.providers.yahoo.base_url)?;
    let cache: Arc<MemoryCache<SeriesCacheKey, PriceSeries>> = Arc::new(MemoryCache::new());
    Ok(Arc::new(CachingSeriesProvider::new(
        yahoo,
        cache,
        config.cache.ttl(),
    )))
}
