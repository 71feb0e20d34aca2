use super::ui;
use crate::core::config::AppConfig;
use crate::core::dashboard::{DashboardContent, DashboardView, build_dashboard};
use crate::core::price::SeriesProvider;
use crate::core::selection::{Selection, SelectionInput, ViewMode};
use crate::core::table::SeriesTable;
use anyhow::Result;
use comfy_table::Cell;

/// Selection made on the command line instead of the page's filter bar.
#[derive(Debug, Clone, Default)]
pub struct ShowArgs {
    pub categories: Vec<String>,
    pub instruments: Vec<String>,
    pub region: Option<String>,
    pub period: Option<String>,
    pub overlay: bool,
}

impl From<&ShowArgs> for SelectionInput {
    fn from(args: &ShowArgs) -> Self {
        SelectionInput {
            region: args.region.clone(),
            mode: Some(
                if args.overlay {
                    ViewMode::Overlay
                } else {
                    ViewMode::Single
                }
                .as_str()
                .to_string(),
            ),
            categories: args.categories.clone(),
            instruments: args.instruments.clone(),
            period: args.period.clone(),
        }
    }
}

/// Runs the dashboard pipeline once and prints it to the terminal.
pub async fn show(config: &AppConfig, provider: &dyn SeriesProvider, args: &ShowArgs) -> Result<()> {
    let (selection, notes) = Selection::resolve(&SelectionInput::from(args), config);

    let pb = ui::new_spinner(&format!("Fetching {}", selection.title()));
    let view = build_dashboard(config, provider, selection, notes).await;
    pb.finish_and_clear();

    println!("{}", render_view(&view));
    Ok(())
}

pub fn render_view(view: &DashboardView) -> String {
    let mut out = format!(
        "\n{} {}\n",
        ui::style_text(&view.selection.title(), ui::StyleType::Title),
        ui::style_text(
            &format!("({}, {})", view.selection.region, view.selection.period.label()),
            ui::StyleType::Subtle
        ),
    );

    for warning in &view.warnings {
        out.push_str(&ui::style_text(warning, ui::StyleType::Warning));
        out.push('\n');
    }

    match &view.content {
        DashboardContent::Data { raw, normalized } => {
            out.push_str(&values_table(raw).to_string());
            out.push('\n');
            out.push_str(&change_table(normalized).to_string());
        }
        DashboardContent::NoData { notice } => {
            out.push_str(&ui::style_text(notice, ui::StyleType::Notice));
        }
    }
    out
}

fn values_table(table: &SeriesTable) -> comfy_table::Table {
    let mut out = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Date")];
    header.extend(table.columns().iter().map(|c| ui::header_cell(c)));
    out.set_header(header);

    for (date, values) in table.rows() {
        let mut row = vec![Cell::new(date.format("%Y-%m-%d"))];
        row.extend(
            values
                .iter()
                .map(|v| ui::format_optional_cell(*v, |x| format!("{x:.2}"))),
        );
        out.add_row(row);
    }
    out
}

/// One row per instrument: change over the window, read off the last
/// normalized value.
fn change_table(normalized: &SeriesTable) -> comfy_table::Table {
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Instrument"),
        ui::header_cell("Last (=100 at start)"),
        ui::header_cell("Change"),
    ]);

    for (idx, name) in normalized.columns().iter().enumerate() {
        let last = normalized.column(idx).into_iter().flatten().next_back();
        let change = last.map_or_else(
            || ui::format_optional_cell(None::<f64>, |_| String::new()),
            |v| ui::change_cell(v - 100.0),
        );
        out.add_row(vec![
            Cell::new(name),
            ui::format_optional_cell(last, |v| format!("{v:.2}")),
            change,
        ]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assembler::InstrumentFetch;
    use crate::core::price::PriceSeries;
    use crate::core::resolver::GLOBAL_REGION;
    use crate::core::period::LookbackPeriod;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FixedProvider;

    #[async_trait]
    impl SeriesProvider for FixedProvider {
        async fn fetch_series(&self, symbol: &str, _period: LookbackPeriod) -> Result<PriceSeries> {
            let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            match symbol {
                "DX-Y.NYB" => Ok(PriceSeries::new(symbol, vec![(d(2), 100.0), (d(3), 102.5)])),
                _ => Err(anyhow!("No price data found for symbol: {symbol}")),
            }
        }
    }

    fn config() -> AppConfig {
        AppConfig::from_yaml_str(
            r#"
fx_rates:
  Dollar Index: DX-Y.NYB
  Euro: EURUSD=X
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_args_map_to_selection_input() {
        let args = ShowArgs {
            categories: vec!["fx_rates".into()],
            overlay: true,
            ..Default::default()
        };
        let input = SelectionInput::from(&args);
        assert_eq!(input.mode.as_deref(), Some("overlay"));
        assert_eq!(input.categories, vec!["fx_rates".to_string()]);
        assert!(input.region.is_none());
    }

    #[tokio::test]
    async fn test_render_view_lists_values_changes_and_warnings() {
        let config = config();
        let args = ShowArgs {
            categories: vec!["fx_rates".into()],
            ..Default::default()
        };
        let (selection, notes) = Selection::resolve(&SelectionInput::from(&args), &config);
        assert_eq!(selection.region, GLOBAL_REGION);

        let view = build_dashboard(&config, &FixedProvider, selection, notes).await;
        assert!(view.has_data());
        let failed: Vec<&InstrumentFetch> =
            view.fetches.iter().filter(|f| f.result.is_err()).collect();
        assert_eq!(failed.len(), 1);

        let text = console::strip_ansi_codes(&render_view(&view)).to_string();
        assert!(text.contains("Dollar Index"));
        assert!(text.contains("2024-01-03"));
        assert!(text.contains("102.50"));
        assert!(text.contains("+2.50%"));
        assert!(text.contains("Error fetching EURUSD=X"));
    }

    #[tokio::test]
    async fn test_render_view_shows_notice_without_data() {
        let config = AppConfig::from_yaml_str("fx_rates:\n  Euro: EURUSD=X\n").unwrap();
        let args = ShowArgs {
            categories: vec!["fx_rates".into()],
            ..Default::default()
        };
        let (selection, notes) = Selection::resolve(&SelectionInput::from(&args), &config);
        let view = build_dashboard(&config, &FixedProvider, selection, notes).await;

        let text = console::strip_ansi_codes(&render_view(&view)).to_string();
        assert!(text.contains("No data available for"));
    }
}
