use crate::core::theme::Theme;
use crate::render::page::render_error_page;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Request-level failures of the HTTP surface.
///
/// Data problems never reach here: they degrade to warnings or the "no data"
/// notice inside a normal page.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("bad_request: {0}")]
    BadRequest(String),
    #[error("not_found: {0}")]
    NotFound(String),
}

impl DashboardError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
        }
    }

    /// Renders the error as an HTML page for browser routes.
    pub fn into_page(self, theme: Theme) -> Response {
        (self.status(), Html(render_error_page(self.message(), theme))).into_response()
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
