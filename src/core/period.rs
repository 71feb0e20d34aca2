//! Lookback windows supported by the market-data provider

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LookbackPeriod {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl LookbackPeriod {
    pub const ALL: [LookbackPeriod; 11] = [
        LookbackPeriod::OneDay,
        LookbackPeriod::FiveDays,
        LookbackPeriod::OneMonth,
        LookbackPeriod::ThreeMonths,
        LookbackPeriod::SixMonths,
        LookbackPeriod::OneYear,
        LookbackPeriod::TwoYears,
        LookbackPeriod::FiveYears,
        LookbackPeriod::TenYears,
        LookbackPeriod::YearToDate,
        LookbackPeriod::Max,
    ];

    /// The `range` parameter understood by the Yahoo chart endpoint.
    pub fn as_range(&self) -> &'static str {
        match self {
            LookbackPeriod::OneDay => "1d",
            LookbackPeriod::FiveDays => "5d",
            LookbackPeriod::OneMonth => "1mo",
            LookbackPeriod::ThreeMonths => "3mo",
            LookbackPeriod::SixMonths => "6mo",
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::TwoYears => "2y",
            LookbackPeriod::FiveYears => "5y",
            LookbackPeriod::TenYears => "10y",
            LookbackPeriod::YearToDate => "ytd",
            LookbackPeriod::Max => "max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookbackPeriod::OneDay => "1 day",
            LookbackPeriod::FiveDays => "5 days",
            LookbackPeriod::OneMonth => "1 month",
            LookbackPeriod::ThreeMonths => "3 months",
            LookbackPeriod::SixMonths => "6 months",
            LookbackPeriod::OneYear => "1 year",
            LookbackPeriod::TwoYears => "2 years",
            LookbackPeriod::FiveYears => "5 years",
            LookbackPeriod::TenYears => "10 years",
            LookbackPeriod::YearToDate => "Year to date",
            LookbackPeriod::Max => "Max",
        }
    }

    /// Whether the period selector may offer this window.
    pub fn is_selectable(&self) -> bool {
        *self != LookbackPeriod::OneDay
    }
}

impl Display for LookbackPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_range())
    }
}

impl FromStr for LookbackPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LookbackPeriod::ALL
            .into_iter()
            .find(|p| p.as_range() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Invalid lookback period: {}", s))
    }
}

impl TryFrom<String> for LookbackPeriod {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LookbackPeriod> for String {
    fn from(value: LookbackPeriod) -> Self {
        value.as_range().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("1MO".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::OneMonth);
        assert_eq!(" ytd ".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::YearToDate);
        assert!("2w".parse::<LookbackPeriod>().is_err());
    }

    #[test]
    fn test_display_matches_range() {
        for period in LookbackPeriod::ALL {
            assert_eq!(period.to_string(), period.as_range());
            assert_eq!(period.to_string().parse::<LookbackPeriod>().unwrap(), period);
        }
    }

    #[test]
    fn test_one_day_is_not_selectable() {
        assert!(!LookbackPeriod::OneDay.is_selectable());
        assert!(LookbackPeriod::OneMonth.is_selectable());
    }

    #[test]
    fn test_serde_uses_range_strings() {
        let periods: Vec<LookbackPeriod> = serde_yaml::from_str("[1mo, 1y, max]").unwrap();
        assert_eq!(
            periods,
            vec![LookbackPeriod::OneMonth, LookbackPeriod::OneYear, LookbackPeriod::Max]
        );
        assert!(serde_yaml::from_str::<Vec<LookbackPeriod>>("[fortnight]").is_err());
    }
}
