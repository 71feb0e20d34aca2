//! Data categories offered by the dashboard

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    InterestRates,
    Inflation,
    FxRates,
    CommoditiesIndices,
    OtherEconomicData,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::InterestRates,
        Category::Inflation,
        Category::FxRates,
        Category::CommoditiesIndices,
        Category::OtherEconomicData,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::InterestRates => "Interest Rates",
            Category::Inflation => "Inflation",
            Category::FxRates => "FX Rates",
            Category::CommoditiesIndices => "Commodities Indices",
            Category::OtherEconomicData => "Other Economic Data",
        }
    }

    /// Identifier used in query strings and on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::InterestRates => "interest_rates",
            Category::Inflation => "inflation",
            Category::FxRates => "fx_rates",
            Category::CommoditiesIndices => "commodities_indices",
            Category::OtherEconomicData => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.slug().eq_ignore_ascii_case(wanted) || c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("Invalid category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_slug_and_label() {
        assert_eq!("fx_rates".parse::<Category>().unwrap(), Category::FxRates);
        assert_eq!("Interest Rates".parse::<Category>().unwrap(), Category::InterestRates);
        assert_eq!("OTHER".parse::<Category>().unwrap(), Category::OtherEconomicData);
        assert!("Debt".parse::<Category>().is_err());
    }
}
