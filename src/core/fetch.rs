//! Per-instrument retrieval with failure isolation

use crate::core::period::LookbackPeriod;
use crate::core::price::{PriceSeries, SeriesProvider};
use thiserror::Error;
use tracing::{debug, warn};

/// Window requested when the selected one returns too little history.
const FALLBACK_PERIOD: LookbackPeriod = LookbackPeriod::OneYear;

/// A single instrument could not be retrieved. Recovered locally: the
/// instrument is left out of the table and the message is shown as a warning.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Error fetching {symbol}: {reason}")]
pub struct FetchError {
    pub symbol: String,
    pub reason: String,
}

/// Fetches `symbol` for `period`, never failing the caller's batch.
///
/// A series with fewer than two points cannot show a trajectory, so a second
/// request is made for one year of history and used if it returned more.
pub async fn fetch_series(
    provider: &dyn SeriesProvider,
    symbol: &str,
    period: LookbackPeriod,
) -> Result<PriceSeries, FetchError> {
    let series = provider.fetch_series(symbol, period).await.map_err(|e| {
        warn!(symbol, %period, error = %e, "Fetch failed");
        FetchError {
            symbol: symbol.to_string(),
            reason: format!("{e:#}"),
        }
    })?;

    if series.len() >= 2 || period == FALLBACK_PERIOD {
        return Ok(series);
    }

    debug!(
        symbol,
        %period,
        points = series.len(),
        "Short history, requesting {}", FALLBACK_PERIOD
    );
    match provider.fetch_series(symbol, FALLBACK_PERIOD).await {
        Ok(longer) if longer.len() > series.len() => Ok(longer),
        Ok(_) => Ok(series),
        Err(e) => {
            debug!(symbol, error = %e, "Fallback fetch failed, keeping short series");
            Ok(series)
        }
    }
}
