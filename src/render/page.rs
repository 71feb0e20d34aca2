//! Page layout: sidebar, filter bar and main area

use super::chart::{build_figure, theme_colors};
use super::escape;
use super::table::render_html_table;
use crate::core::category::Category;
use crate::core::config::AppConfig;
use crate::core::dashboard::{DashboardContent, DashboardView};
use crate::core::resolver::{regions_for, resolve_instruments};
use crate::core::selection::ViewMode;
use crate::core::theme::Theme;
use std::fmt::Write;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    MacroDashboard,
    Settings,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::MacroDashboard, Page::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Page::MacroDashboard => "Macro Dashboard",
            Page::Settings => "Settings",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::MacroDashboard => "/dashboard",
            Page::Settings => "/settings",
        }
    }
}

fn stylesheet(theme: Theme) -> String {
    let colors = theme_colors(theme);
    let (panel, border, muted) = match theme {
        Theme::Dark => ("#262730", "#3d3f4b", "#a3a8b8"),
        Theme::Light => ("#f0f2f6", "#d5d8e0", "#5b6678"),
    };
    format!(
        r#":root {{ --bg: {bg}; --text: {text}; --panel: {panel}; --border: {border}; --muted: {muted}; }}
* {{ box-sizing: border-box; }}
body {{ margin: 0; display: flex; min-height: 100vh; background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; font-size: 14px; }}
nav {{ width: 220px; padding: 24px 16px; background: var(--panel); border-right: 1px solid var(--border); }}
nav h2 {{ font-size: 16px; margin: 0 0 16px; }}
nav a {{ display: block; padding: 8px 10px; border-radius: 6px; color: var(--text); text-decoration: none; }}
nav a.active {{ background: var(--border); font-weight: 600; }}
main {{ flex: 1; padding: 24px 32px; overflow-x: auto; }}
form.filters {{ display: flex; flex-wrap: wrap; gap: 16px; align-items: flex-end; padding: 12px 0 20px; border-bottom: 1px solid var(--border); }}
form.filters label {{ display: flex; flex-direction: column; gap: 4px; color: var(--muted); }}
select, button {{ background: var(--panel); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: 6px 8px; }}
.notice {{ padding: 12px 16px; border-radius: 6px; background: rgba(28, 131, 225, 0.15); }}
.warnings {{ padding: 8px 16px 8px 32px; border-radius: 6px; background: rgba(255, 189, 69, 0.15); }}
table.data {{ border-collapse: collapse; margin: 12px 0 24px; }}
table.data th, table.data td {{ padding: 4px 12px; border-bottom: 1px solid var(--border); text-align: center; }}
#chart {{ width: 100%; height: 520px; }}
"#,
        bg = colors.background,
        text = colors.text,
    )
}

fn layout(title: &str, active: Page, theme: Theme, body: &str, with_chart: bool) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = writeln!(nav, "<a href=\"{}\"{class}>{}</a>", page.path(), page.label());
    }
    let script = if with_chart {
        format!("<script src=\"{PLOTLY_JS}\"></script>\n")
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en" data-theme="{theme}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{style}</style>
{script}</head>
<body>
<nav>
<h2>Macro Dashboard Settings</h2>
{nav}</nav>
<main>
{body}</main>
</body>
</html>
"#,
        theme = theme.as_str(),
        title = escape(title),
        style = stylesheet(theme),
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(
        "<option value=\"{}\"{selected}>{}</option>",
        escape(value),
        escape(label)
    )
}

fn dark_mode_checkbox(theme: Theme) -> String {
    let checked = if theme.is_dark() { " checked" } else { "" };
    format!(
        "<input type=\"hidden\" name=\"dark\" value=\"off\">\
         <label><span>Dark mode</span><input type=\"checkbox\" name=\"dark\" value=\"on\"{checked}></label>"
    )
}

fn filter_bar(view: &DashboardView, theme: Theme) -> String {
    let selection = &view.selection;
    let mut html = String::from("<form class=\"filters\" method=\"get\" action=\"/dashboard\">\n");

    html.push_str("<label><span>Region</span><select name=\"region\">");
    for region in &view.regions {
        html.push_str(&option(region, region, *region == selection.region));
    }
    html.push_str("</select></label>\n");

    html.push_str("<label><span>Mode</span><select name=\"mode\">");
    for (mode, label) in [(ViewMode::Single, "Single"), (ViewMode::Overlay, "Overlay")] {
        html.push_str(&option(mode.as_str(), label, selection.mode == mode));
    }
    html.push_str("</select></label>\n");

    let multiple = if selection.mode == ViewMode::Overlay {
        " multiple size=\"5\""
    } else {
        ""
    };
    let _ = write!(html, "<label><span>Category</span><select name=\"category\"{multiple}>");
    for category in Category::ALL {
        let selected = selection.active_categories().contains(&category);
        html.push_str(&option(category.slug(), category.label(), selected));
    }
    html.push_str("</select></label>\n");

    if view.available.len() > 1 {
        html.push_str(
            "<label><span>Instruments</span><select name=\"instrument\" multiple size=\"5\">",
        );
        for instrument in &view.available {
            let selected = selection.instruments.contains(&instrument.name);
            html.push_str(&option(&instrument.name, &instrument.name, selected));
        }
        html.push_str("</select></label>\n");
    }

    html.push_str("<label><span>Period</span><select name=\"period\">");
    for period in &view.periods {
        html.push_str(&option(period.as_range(), period.label(), *period == selection.period));
    }
    html.push_str("</select></label>\n");

    html.push_str(&dark_mode_checkbox(theme));
    html.push_str("\n<button type=\"submit\">Apply</button>\n</form>\n");
    html
}

fn warnings_list(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ul class=\"warnings\">\n");
    for warning in warnings {
        let _ = writeln!(html, "<li>{}</li>", escape(warning));
    }
    html.push_str("</ul>\n");
    html
}

/// Figure JSON safe to embed inside a `<script>` element.
fn figure_script(json: &str) -> String {
    let json = json.replace("</", "<\\/");
    format!(
        "<script>\nconst figure = {json};\nPlotly.newPlot(\"chart\", figure.data, figure.layout, {{responsive: true}});\n</script>\n"
    )
}

pub fn render_dashboard_page(view: &DashboardView, theme: Theme) -> String {
    let mut body = String::from("<h1>Macro Dashboard</h1>\n<h3>Filters</h3>\n");
    body.push_str(&filter_bar(view, theme));
    body.push_str(&warnings_list(&view.warnings));

    let with_chart = match &view.content {
        DashboardContent::Data { raw, normalized } => {
            let _ = writeln!(
                body,
                "<h2>{} Data Table</h2>",
                escape(&view.selection.title())
            );
            body.push_str(&render_html_table(raw));
            body.push_str("<div id=\"chart\"></div>\n");
            let figure = build_figure(normalized, theme);
            match serde_json::to_string(&figure) {
                Ok(json) => body.push_str(&figure_script(&json)),
                Err(e) => {
                    let _ = writeln!(
                        body,
                        "<p class=\"notice\">Chart unavailable: {}</p>",
                        escape(&e.to_string())
                    );
                }
            }
            true
        }
        DashboardContent::NoData { notice } => {
            let _ = writeln!(body, "<p class=\"notice\">{}</p>", escape(notice));
            false
        }
    };

    layout("Macro Dashboard", Page::MacroDashboard, theme, &body, with_chart)
}

pub fn render_settings_page(config: &AppConfig, theme: Theme) -> String {
    let mut body = String::from("<h1>Settings</h1>\n<h3>App preferences</h3>\n");
    body.push_str("<form class=\"filters\" method=\"get\" action=\"/settings\">\n");
    body.push_str(&dark_mode_checkbox(theme));
    body.push_str("\n<button type=\"submit\">Save</button>\n</form>\n");

    body.push_str("<h3>Configured instruments</h3>\n");
    for category in Category::ALL {
        let _ = writeln!(body, "<h4>{}</h4>\n<ul>", escape(category.label()));
        for region in regions_for(config, category) {
            let names: Vec<String> = resolve_instruments(config, category, &region)
                .into_iter()
                .map(|i| format!("{} ({})", escape(&i.name), escape(&i.symbol)))
                .collect();
            let names = if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            };
            let _ = writeln!(body, "<li><strong>{}</strong>: {names}</li>", escape(&region));
        }
        body.push_str("</ul>\n");
    }

    let periods: Vec<&str> = config
        .selectable_periods()
        .iter()
        .map(|p| p.as_range())
        .collect();
    let _ = write!(
        body,
        "<h3>Data source</h3>\n<ul>\n<li>Periods: {}</li>\n<li>Provider: {}</li>\n<li>Cache window: {} s</li>\n</ul>\n",
        periods.join(", "),
        escape(&config.providers.yahoo.base_url),
        config.cache.ttl_secs,
    );

    layout("Settings", Page::Settings, theme, &body, false)
}

/// Page for a request that could not be served.
pub fn render_error_page(message: &str, theme: Theme) -> String {
    let body = format!(
        "<h1>Something went wrong</h1>\n<p class=\"notice\">{}</p>\n",
        escape(message)
    );
    layout("Error", Page::MacroDashboard, theme, &body, false)
}
