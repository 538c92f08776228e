use axum::extract::State;
use axum::Json;

use super::positions::{list_views, ApiResponse, PositionView};
use crate::errors::AppError;
use crate::AppState;

/// Force a quote refresh regardless of staleness, then return the
/// refreshed table.
pub async fn trigger(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PositionView>>>, AppError> {
    state.refresh.refresh_all().await?;
    Ok(ApiResponse::ok(list_views(&state).await?))
}
