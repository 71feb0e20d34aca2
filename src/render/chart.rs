//! Line chart of normalized series as a Plotly figure

use super::escape;
use crate::core::table::SeriesTable;
use crate::core::theme::Theme;
use serde::Serialize;

/// Trace colours, assigned by column index and cycled.
pub const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "% Change (normalized to 100)";
const HOVER_TEMPLATE: &str = "%{y:.2f}% on %{x}";

/// Background and foreground colours for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
}

pub fn theme_colors(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors {
            background: "#0e1117",
            text: "#fafafa",
            grid: "#31333f",
        },
        Theme::Light => ThemeColors {
            background: "#ffffff",
            text: "#262730",
            grid: "#e6e9ef",
        },
    }
}

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    pub line: Line,
    pub hovertemplate: String,
    pub connectgaps: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub font: Font,
    pub hovermode: &'static str,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub gridcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: &'static str,
}

/// One trace per column of `table`, coloured by the theme.
pub fn build_figure(table: &SeriesTable, theme: Theme) -> Figure {
    let colors = theme_colors(theme);
    let x: Vec<String> = table.dates().map(|d| d.format("%Y-%m-%d").to_string()).collect();

    let data = table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| Trace {
            kind: "scatter",
            mode: "lines+markers",
            name: name.clone(),
            x: x.clone(),
            y: table.column(index),
            line: Line {
                color: color_for(index),
            },
            hovertemplate: format!("{HOVER_TEMPLATE}<extra>{}</extra>", escape(name)),
            connectgaps: true,
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            paper_bgcolor: colors.background,
            plot_bgcolor: colors.background,
            font: Font { color: colors.text },
            hovermode: "x unified",
            xaxis: Axis {
                title: Title { text: X_AXIS_TITLE },
                gridcolor: colors.grid,
            },
            yaxis: Axis {
                title: Title { text: Y_AXIS_TITLE },
                gridcolor: colors.grid,
            },
            legend: Legend {
                title: Title { text: "Instrument" },
            },
        },
    }
}
