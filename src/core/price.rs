//! Price series and the provider abstraction

use crate::core::period::LookbackPeriod;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date-ordered closing values for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    /// Builds a series, sorting by date. A repeated date keeps the last value.
    pub fn new(symbol: impl Into<String>, mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(date, _)| *date);
        let mut deduped: Vec<(NaiveDate, f64)> = Vec::with_capacity(points.len());
        for (date, value) in points {
            match deduped.last_mut() {
                Some(last) if last.0 == date => last.1 = value,
                _ => deduped.push((date, value)),
            }
        }
        Self {
            symbol: symbol.into(),
            points: deduped,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

#[async_trait]
pub trait SeriesProvider: Send + Sync {
    async fn fetch_series(&self, symbol: &str, period: LookbackPeriod) -> Result<PriceSeries>;
}
