use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Session-scoped display preference. Only affects chart and page colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Parses the dark-mode checkbox value.
    pub fn from_dark_flag(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "on" | "true" | "1" | "yes" => Some(Theme::Dark),
            "off" | "false" | "0" | "no" => Some(Theme::Light),
            _ => None,
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(anyhow::anyhow!("Invalid theme: {}", s)),
        }
    }
}
