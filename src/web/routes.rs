use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Query, State};
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;

use super::error::DashboardError;
use super::session::{resolve_theme, theme_cookie};
use super::state::AppState;
use crate::core::dashboard::{DashboardContent, DashboardView, build_dashboard};
use crate::core::selection::{Selection, SelectionInput};
use crate::core::theme::Theme;
use crate::render::chart::build_figure;
use crate::render::page::{render_dashboard_page, render_settings_page};

type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard))
        .route("/dashboard", get(dashboard))
        .route("/settings", get(settings))
        .route("/api/series", get(api_series))
        .route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn with_theme_cookie(theme: Theme, changed: bool, page: String) -> Response {
    if changed {
        (AppendHeaders([(SET_COOKIE, theme_cookie(theme))]), Html(page)).into_response()
    } else {
        Html(page).into_response()
    }
}

async fn run_pipeline(state: &AppState, pairs: &[(String, String)]) -> DashboardView {
    let input = SelectionInput::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let (selection, notes) = Selection::resolve(&input, &state.config);
    build_dashboard(&state.config, state.provider.as_ref(), selection, notes).await
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: QueryPairs,
) -> Response {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            let (theme, _) = resolve_theme(&headers, &[]);
            return DashboardError::BadRequest(e.body_text()).into_page(theme);
        }
    };
    let (theme, changed) = resolve_theme(&headers, &pairs);
    let view = run_pipeline(&state, &pairs).await;
    with_theme_cookie(theme, changed, render_dashboard_page(&view, theme))
}

async fn settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: QueryPairs,
) -> Response {
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let (theme, changed) = resolve_theme(&headers, &pairs);
    with_theme_cookie(theme, changed, render_settings_page(&state.config, theme))
}

/// Per-instrument outcome, in fetch order.
fn instrument_outcomes(view: &DashboardView) -> Vec<Value> {
    view.fetches
        .iter()
        .map(|fetch| match &fetch.result {
            Ok(series) => json!({
                "category": fetch.category.slug(),
                "name": fetch.instrument.name,
                "symbol": fetch.instrument.symbol,
                "points": series.len(),
            }),
            Err(e) => json!({
                "category": fetch.category.slug(),
                "name": fetch.instrument.name,
                "symbol": fetch.instrument.symbol,
                "error": e.to_string(),
            }),
        })
        .collect()
}

async fn api_series(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: QueryPairs,
) -> Result<Json<Value>, DashboardError> {
    let Query(pairs) = query.map_err(|e| DashboardError::BadRequest(e.body_text()))?;
    let (theme, _) = resolve_theme(&headers, &pairs);
    let view = run_pipeline(&state, &pairs).await;

    let body = match &view.content {
        DashboardContent::Data { raw, normalized } => json!({
            "selection": view.selection,
            "columns": raw.columns(),
            "rows": raw.to_records(),
            "normalized": normalized.to_records(),
            "warnings": view.warnings,
            "instruments": instrument_outcomes(&view),
            "figure": build_figure(normalized, theme),
        }),
        DashboardContent::NoData { notice } => json!({
            "selection": view.selection,
            "notice": notice,
            "warnings": view.warnings,
            "instruments": instrument_outcomes(&view),
        }),
    };
    Ok(Json(body))
}

pub async fn not_found(OriginalUri(uri): OriginalUri, headers: HeaderMap) -> Response {
    let (theme, _) = resolve_theme(&headers, &[]);
    DashboardError::NotFound(format!("No page at {}", uri.path())).into_page(theme)
}
