use super::templates::Templates;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use minijinja::context;
use thiserror::Error;

/// Failures that end a request with an error page.
///
/// Form validation problems are not errors here: handlers re-render the
/// form with a 422 instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            AppError::NotFound(what) => {
                tracing::debug!(what = %what, "not found");
                Templates::shared()
                    .render("error_404.html", context! { message => what })
                    .unwrap_or_else(|_| fallback_html("Not found"))
            }
            err => {
                tracing::error!(error = %err, "request failed");
                Templates::shared()
                    .render("error_500.html", context! {})
                    .unwrap_or_else(|_| fallback_html("Internal server error"))
            }
        };

        (status, Html(page)).into_response()
    }
}

fn fallback_html(title: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>{0}</title></head><body><h1>{0}</h1></body></html>", title)
}
