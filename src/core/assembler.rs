//! Fetches resolved instruments and merges them into one table

use crate::core::category::Category;
use crate::core::fetch::{FetchError, fetch_series};
use crate::core::period::LookbackPeriod;
use crate::core::price::{PriceSeries, SeriesProvider};
use crate::core::resolver::Instrument;
use crate::core::table::SeriesTable;
use tracing::debug;

/// Outcome of fetching one instrument.
#[derive(Debug, Clone)]
pub struct InstrumentFetch {
    pub category: Category,
    pub instrument: Instrument,
    pub result: Result<PriceSeries, FetchError>,
}

/// Either a table with at least one populated column, or the explicit
/// signal that nothing could be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Assembled {
    Table(SeriesTable),
    NoData,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub assembled: Assembled,
    pub fetches: Vec<InstrumentFetch>,
}

impl Assembly {
    pub fn failures(&self) -> impl Iterator<Item = &FetchError> {
        self.fetches.iter().filter_map(|f| f.result.as_ref().err())
    }

    /// One user-facing message per failed instrument.
    pub fn warnings(&self) -> Vec<String> {
        self.failures().map(ToString::to_string).collect()
    }
}

/// Accumulates instruments from one or more categories into a single table.
///
/// Instruments are fetched one at a time in the order they are added.
pub struct Assembler<'a> {
    provider: &'a dyn SeriesProvider,
    period: LookbackPeriod,
    table: SeriesTable,
    fetches: Vec<InstrumentFetch>,
}

impl<'a> Assembler<'a> {
    pub fn new(provider: &'a dyn SeriesProvider, period: LookbackPeriod) -> Self {
        Self {
            provider,
            period,
            table: SeriesTable::new(),
            fetches: Vec::new(),
        }
    }

    pub async fn add_category(&mut self, category: Category, instruments: &[Instrument]) {
        debug!(%category, count = instruments.len(), "Assembling category");
        for instrument in instruments {
            let result = fetch_series(self.provider, &instrument.symbol, self.period).await;
            if let Ok(series) = &result {
                self.table.join_series(&instrument.name, series);
            }
            self.fetches.push(InstrumentFetch {
                category,
                instrument: instrument.clone(),
                result,
            });
        }
    }

    pub fn finish(self) -> Assembly {
        let assembled = if self.table.has_data() {
            Assembled::Table(self.table)
        } else {
            Assembled::NoData
        };
        Assembly {
            assembled,
            fetches: self.fetches,
        }
    }
}
