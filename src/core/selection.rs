//! User selection, re-derived on every interaction

use crate::core::category::Category;
use crate::core::config::AppConfig;
use crate::core::period::LookbackPeriod;
use crate::core::resolver::regions_for_all;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const PREFERRED_REGION: &str = "US";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Single,
    Overlay,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Single => "single",
            ViewMode::Overlay => "overlay",
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(ViewMode::Single),
            "overlay" => Ok(ViewMode::Overlay),
            _ => Err(anyhow::anyhow!("Invalid mode: {}", s)),
        }
    }
}

/// Raw, unvalidated filter values as submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionInput {
    pub region: Option<String>,
    pub mode: Option<String>,
    pub categories: Vec<String>,
    pub instruments: Vec<String>,
    pub period: Option<String>,
}

impl SelectionInput {
    /// Collects filter values from decoded `key=value` pairs. Repeated
    /// `category` and `instrument` keys accumulate; for the others the last
    /// value wins.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut input = SelectionInput::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "region" => input.region = Some(value.to_string()),
                "mode" => input.mode = Some(value.to_string()),
                "category" => input.categories.push(value.to_string()),
                "instrument" => input.instruments.push(value.to_string()),
                "period" => input.period = Some(value.to_string()),
                _ => {}
            }
        }
        input
    }
}

/// Validated selection the pipeline runs on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub region: String,
    pub mode: ViewMode,
    /// Every selected category, in order, without duplicates. Never empty.
    pub categories: Vec<Category>,
    /// Display names to keep; empty keeps every resolved instrument.
    pub instruments: Vec<String>,
    pub period: LookbackPeriod,
}

impl Selection {
    /// Validates `input` against `config`, substituting defaults for missing
    /// or inapplicable values. The second element lists values that could
    /// not be parsed at all.
    pub fn resolve(input: &SelectionInput, config: &AppConfig) -> (Selection, Vec<String>) {
        let mut notes = Vec::new();

        let mode = match input.mode.as_deref().map(ViewMode::from_str) {
            Some(Ok(mode)) => mode,
            Some(Err(e)) => {
                notes.push(format!("{e}, showing single category"));
                ViewMode::Single
            }
            None => ViewMode::Single,
        };

        let mut categories = Vec::new();
        for raw in &input.categories {
            match raw.parse::<Category>() {
                Ok(category) if !categories.contains(&category) => categories.push(category),
                Ok(_) => {}
                Err(e) => notes.push(e.to_string()),
            }
        }
        if categories.is_empty() {
            categories.push(Category::InterestRates);
        }

        let periods = config.selectable_periods();
        let period = match input.period.as_deref().map(LookbackPeriod::from_str) {
            Some(Ok(period)) if periods.contains(&period) => period,
            Some(Ok(_)) => config.default_period(),
            Some(Err(e)) => {
                notes.push(e.to_string());
                config.default_period()
            }
            None => config.default_period(),
        };

        let mut selection = Selection {
            region: String::new(),
            mode,
            categories,
            instruments: input.instruments.clone(),
            period,
        };

        // The filter form resubmits the previous region, which need not apply
        // to a newly chosen category.
        let regions = regions_for_all(config, selection.active_categories());
        selection.region = match &input.region {
            Some(region) if regions.contains(region) => region.clone(),
            _ => default_region(&regions),
        };

        (selection, notes)
    }

    /// Categories the pipeline runs: the first one in single mode, all of
    /// them in overlay mode.
    pub fn active_categories(&self) -> &[Category] {
        match self.mode {
            ViewMode::Single => &self.categories[..1],
            ViewMode::Overlay => &self.categories,
        }
    }

    /// Joined labels of the active categories, for titles and notices.
    pub fn title(&self) -> String {
        self.active_categories()
            .iter()
            .map(Category::label)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

fn default_region(regions: &[String]) -> String {
    if regions.iter().any(|r| r == PREFERRED_REGION) {
        PREFERRED_REGION.to_string()
    } else {
        regions
            .first()
            .cloned()
            .unwrap_or_else(|| PREFERRED_REGION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::from_yaml_str(
            r#"
interest_rates:
  US: { "10 Year Treasury": "^TNX" }
  UK: { "UK Gilt ETF": "IGLT.L" }
inflation:
  "US CPI": "TIP"
fx_rates:
  "EUR/USD": "EURUSD=X"
default_periods: [1d, 5d, 1mo, 1y]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let (selection, notes) = Selection::resolve(&SelectionInput::default(), &config());
        assert!(notes.is_empty());
        assert_eq!(selection.mode, ViewMode::Single);
        assert_eq!(selection.categories, vec![Category::InterestRates]);
        assert_eq!(selection.region, "US");
        assert_eq!(selection.period, LookbackPeriod::OneMonth);
        assert_eq!(selection.title(), "Interest Rates");
    }

    #[test]
    fn test_from_pairs_accumulates_repeated_keys() {
        let input = SelectionInput::from_pairs([
            ("mode", "overlay"),
            ("category", "interest_rates"),
            ("category", "inflation"),
            ("region", "UK"),
            ("region", "US"),
            ("period", ""),
            ("dark", "on"),
        ]);
        assert_eq!(input.mode.as_deref(), Some("overlay"));
        assert_eq!(input.categories, vec!["interest_rates", "inflation"]);
        assert_eq!(input.region.as_deref(), Some("US"));
        assert_eq!(input.period, None);
    }

    #[test]
    fn test_single_mode_uses_first_category() {
        let input = SelectionInput {
            categories: vec!["fx_rates".into(), "inflation".into()],
            ..Default::default()
        };
        let (selection, _) = Selection::resolve(&input, &config());
        assert_eq!(selection.active_categories(), [Category::FxRates]);
        assert_eq!(selection.region, "Global");
    }

    #[test]
    fn test_overlay_keeps_all_categories_once() {
        let input = SelectionInput {
            mode: Some("overlay".into()),
            categories: vec!["inflation".into(), "interest_rates".into(), "Inflation".into()],
            region: Some("US".into()),
            ..Default::default()
        };
        let (selection, notes) = Selection::resolve(&input, &config());
        assert!(notes.is_empty());
        assert_eq!(
            selection.active_categories(),
            [Category::Inflation, Category::InterestRates]
        );
        assert_eq!(selection.title(), "Inflation + Interest Rates");
    }

    #[test]
    fn test_unparseable_values_fall_back_with_notes() {
        let input = SelectionInput {
            mode: Some("grid".into()),
            categories: vec!["debt".into()],
            period: Some("fortnight".into()),
            ..Default::default()
        };
        let (selection, notes) = Selection::resolve(&input, &config());
        assert_eq!(selection.mode, ViewMode::Single);
        assert_eq!(selection.categories, vec![Category::InterestRates]);
        assert_eq!(selection.period, LookbackPeriod::OneMonth);
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_inapplicable_region_and_period_fall_back_silently() {
        let input = SelectionInput {
            region: Some("Atlantis".into()),
            period: Some("1d".into()),
            ..Default::default()
        };
        let (selection, notes) = Selection::resolve(&input, &config());
        assert_eq!(selection.region, "US");
        assert_eq!(selection.period, LookbackPeriod::OneMonth);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_switching_category_drops_previous_region() {
        let to_fx = SelectionInput::from_pairs([("region", "US"), ("category", "fx_rates")]);
        let (selection, notes) = Selection::resolve(&to_fx, &config());
        assert_eq!(selection.region, "Global");
        assert!(notes.is_empty());

        let back = SelectionInput::from_pairs([("region", "Global"), ("category", "interest_rates")]);
        let (selection, notes) = Selection::resolve(&back, &config());
        assert_eq!(selection.region, "US");
        assert!(notes.is_empty());
    }
}
