use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::positions::ApiResponse;
use crate::errors::AppError;
use crate::models::SearchResult;
use crate::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Free-text symbol search. User-initiated, so upstream failures are
/// propagated instead of degraded.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<SearchResult>>>, AppError> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest("Query parameter q must not be empty".into()));
    }

    let results = state
        .search
        .search(term)
        .await
        .map_err(AppError::Upstream)?;
    Ok(ApiResponse::ok(results))
}
