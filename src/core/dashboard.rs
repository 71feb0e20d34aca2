//! The full pipeline for one interaction: resolve, fetch, join, normalize

use crate::core::assembler::{Assembled, Assembler, InstrumentFetch};
use crate::core::category::Category;
use crate::core::config::AppConfig;
use crate::core::period::LookbackPeriod;
use crate::core::price::SeriesProvider;
use crate::core::resolver::{Instrument, regions_for_all, resolve_instruments};
use crate::core::selection::Selection;
use crate::core::table::SeriesTable;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum DashboardContent {
    Data {
        /// Joined values as fetched.
        raw: SeriesTable,
        /// Same shape, each column rescaled to start at 100.
        normalized: SeriesTable,
    },
    NoData {
        notice: String,
    },
}

/// Everything the renderers need for one page.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub selection: Selection,
    /// Regions offered for the active categories.
    pub regions: Vec<String>,
    pub periods: Vec<LookbackPeriod>,
    /// Instruments resolved for the active categories before filtering.
    pub available: Vec<Instrument>,
    pub fetches: Vec<InstrumentFetch>,
    pub warnings: Vec<String>,
    pub content: DashboardContent,
}

impl DashboardView {
    pub fn has_data(&self) -> bool {
        matches!(self.content, DashboardContent::Data { .. })
    }
}

/// Runs the pipeline for `selection`. Never fails: fetch errors become
/// warnings and an empty result becomes the "no data" notice.
pub async fn build_dashboard(
    config: &AppConfig,
    provider: &dyn SeriesProvider,
    selection: Selection,
    mut warnings: Vec<String>,
) -> DashboardView {
    let categories = selection.active_categories().to_vec();
    let resolved: Vec<(Category, Vec<Instrument>)> = categories
        .iter()
        .map(|category| {
            (
                *category,
                resolve_instruments(config, *category, &selection.region),
            )
        })
        .collect();
    let available: Vec<Instrument> = resolved
        .iter()
        .flat_map(|(_, instruments)| instruments.iter().cloned())
        .collect();

    // A filter left over from another category matches nothing; ignore it
    // rather than blank the view.
    let filter_active = available
        .iter()
        .any(|i| selection.instruments.contains(&i.name));

    let mut assembler = Assembler::new(provider, selection.period);
    for (category, instruments) in &resolved {
        let wanted: Vec<Instrument> = instruments
            .iter()
            .filter(|i| !filter_active || selection.instruments.contains(&i.name))
            .cloned()
            .collect();
        debug!(
            %category,
            region = %selection.region,
            resolved = instruments.len(),
            wanted = wanted.len(),
            "Resolved instruments"
        );
        assembler.add_category(*category, &wanted).await;
    }

    let assembly = assembler.finish();
    warnings.extend(assembly.warnings());

    let content = match assembly.assembled {
        Assembled::Table(raw) => {
            let (normalized, degenerate) = raw.normalized();
            warnings.extend(
                degenerate
                    .into_iter()
                    .map(|name| format!("{name} cannot be normalized: first value is zero or missing")),
            );
            DashboardContent::Data { raw, normalized }
        }
        Assembled::NoData => DashboardContent::NoData {
            notice: format!(
                "No data available for {} ({})",
                selection.title(),
                selection.region
            ),
        },
    };

    info!(
        categories = %selection.title(),
        region = %selection.region,
        period = %selection.period,
        warnings = warnings.len(),
        "Dashboard built"
    );

    DashboardView {
        regions: regions_for_all(config, &categories),
        periods: config.selectable_periods(),
        selection,
        available,
        fetches: assembly.fetches,
        warnings,
        content,
    }
}
