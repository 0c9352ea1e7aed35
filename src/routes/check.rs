//! URL check endpoints.
//!
//! POST (JSON body) and GET (query string) are thin extractors over one
//! lookup core: the body and query variants differ only in where the URL
//! comes from and in the wording of the missing-URL error.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::models::{CheckQuery, CheckRequest, CheckResult};
use crate::normalize;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/check-url", get(check_url_query).post(check_url_body))
}

/// `POST /api/check-url` with the URL in the JSON body.
pub async fn check_url_body(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CheckRequest>>,
) -> Result<Json<CheckResult>, ApiError> {
    let url = body
        .and_then(|Json(request)| request.url)
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidInput("URL not provided in body".into()))?;
    run_check(&state, &url).await
}

/// `GET /api/check-url?url=` with the URL in the query string.
pub async fn check_url_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<CheckResult>, ApiError> {
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidInput("URL not provided in query".into()))?;
    run_check(&state, &url).await
}

/// Shared core: normalize the input, then ask the gateway for a verdict.
async fn run_check(state: &AppState, raw: &str) -> Result<Json<CheckResult>, ApiError> {
    let normalized = normalize::normalize(raw)
        .ok_or_else(|| ApiError::InvalidInput("invalid URL".into()))?;
    let result = state.gateway.check_url(&normalized).await?;
    Ok(Json(result))
}
