//! Resolves a category and region into the instruments to fetch

use crate::core::category::Category;
use crate::core::config::{AppConfig, InstrumentMap, RegionalInstruments};
use serde::Serialize;

/// Region shown for categories that do not depend on a region.
pub const GLOBAL_REGION: &str = "Global";

const CPI_SUFFIX: &str = " CPI";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Instrument {
    pub name: String,
    pub symbol: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

/// Instruments configured for `category` in `region`, ordered by display name.
///
/// An empty result means "nothing to display", never an error.
pub fn resolve_instruments(config: &AppConfig, category: Category, region: &str) -> Vec<Instrument> {
    match category {
        Category::InterestRates => regional(&config.interest_rates, region),
        Category::OtherEconomicData => regional(&config.other, region),
        Category::Inflation => inflation(&config.inflation, region),
        Category::FxRates => flat(&config.fx_rates),
        Category::CommoditiesIndices => flat(&config.commodities_indices),
    }
}

fn regional(mapping: &RegionalInstruments, region: &str) -> Vec<Instrument> {
    mapping.get(region).map(flat).unwrap_or_default()
}

fn inflation(mapping: &InstrumentMap, region: &str) -> Vec<Instrument> {
    let name = format!("{region}{CPI_SUFFIX}");
    mapping
        .get(&name)
        .map(|symbol| vec![Instrument::new(name.clone(), symbol.clone())])
        .unwrap_or_default()
}

fn flat(mapping: &InstrumentMap) -> Vec<Instrument> {
    mapping
        .iter()
        .map(|(name, symbol)| Instrument::new(name.clone(), symbol.clone()))
        .collect()
}

/// Regions the region selector offers for `category`, sorted.
pub fn regions_for(config: &AppConfig, category: Category) -> Vec<String> {
    match category {
        Category::InterestRates => config.interest_rates.keys().cloned().collect(),
        Category::OtherEconomicData => config.other.keys().cloned().collect(),
        Category::Inflation => config
            .inflation
            .keys()
            .filter_map(|key| key.strip_suffix(CPI_SUFFIX))
            .map(str::to_string)
            .collect(),
        Category::FxRates | Category::CommoditiesIndices => vec![GLOBAL_REGION.to_string()],
    }
}

/// Union of the regions for every category in `categories`, sorted.
pub fn regions_for_all(config: &AppConfig, categories: &[Category]) -> Vec<String> {
    let mut regions: Vec<String> = categories
        .iter()
        .flat_map(|category| regions_for(config, *category))
        .collect();
    regions.sort();
    regions.dedup();
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::from_yaml_str(
            r#"
interest_rates:
  US:
    "13 Week T-Bill": "^IRX"
    "10 Year Treasury": "^TNX"
  EU:
    "Euro Bund": "FGBL=F"
inflation:
  "US CPI": "TIP"
  "EU CPI": "EUINF"
fx_rates:
  "EUR/USD": "EURUSD=X"
  "USD/JPY": "JPY=X"
commodities_indices:
  "Gold": "GC=F"
other:
  US:
    "S&P 500": "^GSPC"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_interest_rates_resolve_per_region() {
        let instruments = resolve_instruments(&config(), Category::InterestRates, "US");
        assert_eq!(
            instruments,
            vec![
                Instrument::new("10 Year Treasury", "^TNX"),
                Instrument::new("13 Week T-Bill", "^IRX"),
            ]
        );
        assert!(resolve_instruments(&config(), Category::InterestRates, "JP").is_empty());
    }

    #[test]
    fn test_inflation_resolves_synthetic_cpi_entry() {
        assert_eq!(
            resolve_instruments(&config(), Category::Inflation, "US"),
            vec![Instrument::new("US CPI", "TIP")]
        );
        assert!(resolve_instruments(&config(), Category::Inflation, "UK").is_empty());
    }

    #[test]
    fn test_flat_categories_ignore_region() {
        let config = config();
        assert_eq!(
            resolve_instruments(&config, Category::FxRates, "US"),
            resolve_instruments(&config, Category::FxRates, "Nowhere")
        );
        assert_eq!(
            resolve_instruments(&config, Category::CommoditiesIndices, "US"),
            vec![Instrument::new("Gold", "GC=F")]
        );
    }

    #[test]
    fn test_other_economic_data() {
        assert_eq!(
            resolve_instruments(&config(), Category::OtherEconomicData, "US"),
            vec![Instrument::new("S&P 500", "^GSPC")]
        );
        assert!(resolve_instruments(&config(), Category::OtherEconomicData, "EU").is_empty());
    }

    #[test]
    fn test_regions() {
        let config = config();
        assert_eq!(regions_for(&config, Category::InterestRates), vec!["EU", "US"]);
        assert_eq!(regions_for(&config, Category::Inflation), vec!["EU", "US"]);
        assert_eq!(regions_for(&config, Category::FxRates), vec![GLOBAL_REGION]);
        assert_eq!(
            regions_for_all(&config, &[Category::OtherEconomicData, Category::FxRates]),
            vec!["Global", "US"]
        );
    }
}
