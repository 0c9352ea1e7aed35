//! HTTP route modules.

pub mod check;
pub mod health;

use axum::response::Html;

/// Embedded form page: one input, a submit button, and a verdict region.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
