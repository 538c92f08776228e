use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::position_repo::{self, NewPosition, PositionPatch};
use crate::errors::AppError;
use crate::models::Position;
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

/// A position with its derived metrics, as the table view renders it.
#[derive(Serialize)]
pub struct PositionView {
    #[serde(flatten)]
    pub position: Position,
    pub investment: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub profit: Option<Decimal>,
    pub profit_percent: Option<Decimal>,
    pub current_change_percent: Option<Decimal>,
}

impl From<Position> for PositionView {
    fn from(position: Position) -> Self {
        Self {
            investment: position.investment(),
            current_value: position.current_value(),
            profit: position.profit(),
            profit_percent: position.profit_percent(),
            current_change_percent: position.current_change_percent(),
            position,
        }
    }
}

pub async fn list_views(state: &AppState) -> Result<Vec<PositionView>, AppError> {
    let positions = position_repo::get_all(&state.db).await?;
    Ok(positions.into_iter().map(PositionView::from).collect())
}

/// Table view data: refresh quotes when stale, then list every position
/// with metrics. A failed refresh is logged and the view renders whatever
/// data is stored.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<PositionView>>>, AppError> {
    if let Err(e) = state.refresh.refresh_if_due().await {
        tracing::warn!(error = %e, "Refresh failed, serving stale data");
    }

    Ok(ApiResponse::ok(list_views(&state).await?))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PositionView>>, AppError> {
    let position = position_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Position not found".into()))?;

    Ok(ApiResponse::ok(PositionView::from(position)))
}

#[derive(Deserialize)]
pub struct CreatePositionRequest {
    pub symbol: String,
    pub name: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub quantity: Option<Decimal>,
    pub initial_price: Option<Decimal>,
    #[serde(default = "default_display_chart")]
    pub display_chart: bool,
}

fn default_currency() -> String {
    "USD".into()
}

fn default_display_chart() -> bool {
    true
}

/// Add a position. When the name or cost basis are omitted, one quote
/// lookup pre-fills them; a failed lookup leaves them empty rather than
/// failing the add.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePositionRequest>,
) -> Result<Json<ApiResponse<PositionView>>, AppError> {
    let symbol = req.symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(AppError::BadRequest("Symbol must not be empty".into()));
    }

    let mut name = req.name;
    let mut initial_price = req.initial_price;

    if name.is_none() || initial_price.is_none() {
        if let Some(quote) = state.refresh.lookup(&symbol).await {
            if name.is_none() {
                name = quote.long_name.clone();
            }
            if initial_price.is_none() {
                initial_price = quote.current_price();
            }
        }
    }

    let new = NewPosition {
        name: name.unwrap_or_else(|| symbol.clone()),
        symbol,
        currency: req.currency,
        quantity: req.quantity,
        initial_price,
        display_chart: req.display_chart,
    };

    let position = position_repo::insert(&state.db, &new).await?;
    Ok(ApiResponse::ok(PositionView::from(position)))
}

#[derive(Deserialize)]
pub struct UpdatePositionRequest {
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub quantity: Option<Decimal>,
    pub initial_price: Option<Decimal>,
    pub display_chart: bool,
}

/// User edit of the descriptive and holding fields. Quote fields and
/// timestamps stay with the refresh workflow.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePositionRequest>,
) -> Result<Json<ApiResponse<PositionView>>, AppError> {
    let symbol = req.symbol.trim().to_string();
    if symbol.is_empty() {
        return Err(AppError::BadRequest("Symbol must not be empty".into()));
    }

    let patch = PositionPatch {
        symbol,
        name: req.name,
        currency: req.currency,
        quantity: req.quantity,
        initial_price: req.initial_price,
        display_chart: req.display_chart,
    };

    let position = position_repo::update(&state.db, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Position not found".into()))?;

    Ok(ApiResponse::ok(PositionView::from(position)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deleted = position_repo::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Position not found".into()));
    }

    Ok(ApiResponse::ok(()))
}
