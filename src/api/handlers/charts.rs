use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::db::position_repo;
use crate::errors::AppError;
use crate::models::{ChartRange, ChartSeries};
use crate::AppState;

/// Chart time-series for one position. Unknown id, unknown range, and any
/// upstream chart failure (network, API error, malformed payload) all
/// surface as 404: the chart simply has no data to show.
pub async fn data(
    State(state): State<AppState>,
    Path((id, range)): Path<(Uuid, String)>,
) -> Result<Json<ChartSeries>, AppError> {
    let range: ChartRange = range
        .parse()
        .map_err(|_| AppError::NotFound("Invalid range".into()))?;

    let position = position_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Position not found".into()))?;

    let series = state
        .charts
        .chart(&position.symbol, range)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, symbol = %position.symbol, "Chart data unavailable");
            AppError::NotFound(format!("Chart data unavailable: {e}"))
        })?;

    Ok(Json(series))
}
