use crate::core::cache::Cache;
use crate::core::period::LookbackPeriod;
use crate::core::price::{PriceSeries, SeriesProvider};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub type SeriesCacheKey = (String, LookbackPeriod);

/// Memoizes successful fetches per `(symbol, period)` for a fixed window.
///
/// Failures are not cached, so the next interaction asks the provider again.
pub struct CachingSeriesProvider<P: SeriesProvider> {
    inner: P,
    cache: Arc<dyn Cache<SeriesCacheKey, PriceSeries>>,
    ttl: Duration,
}

impl<P: SeriesProvider> CachingSeriesProvider<P> {
    pub fn new(
        inner: P,
        cache: Arc<dyn Cache<SeriesCacheKey, PriceSeries>>,
        ttl: Duration,
    ) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait]
impl<P: SeriesProvider> SeriesProvider for CachingSeriesProvider<P> {
    async fn fetch_series(&self, symbol: &str, period: LookbackPeriod) -> Result<PriceSeries> {
        let key = (symbol.to_string(), period);
        if let Some(cached) = self.cache.get(&key).await {
            debug!("Cache hit for series: {} {}", symbol, period);
            return Ok(cached);
        }

        debug!("Cache miss for series: {} {}", symbol, period);
        let series = self.inner.fetch_series(symbol, period).await?;
        self.cache.put(key, series.clone(), Some(self.ttl)).await;
        Ok(series)
    }
}
