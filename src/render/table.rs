//! Tabular view of the raw joined values

use super::escape;
use crate::core::table::SeriesTable;
use std::fmt::Write;

pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.2}"))
}

/// HTML table with a date column followed by one column per instrument.
pub fn render_html_table(table: &SeriesTable) -> String {
    let mut html = String::from("<table class=\"data\">\n<thead><tr><th>Date</th>");
    for column in table.columns() {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for (date, values) in table.rows() {
        let _ = write!(html, "<tr><td>{}</td>", date.format("%Y-%m-%d"));
        for value in values {
            let _ = write!(html, "<td>{}</td>", format_value(*value));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}
