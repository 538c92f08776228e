use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Position;

/// Postgres unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Fields a user may set when adding a position.
#[derive(Debug, Clone)]
pub struct NewPosition {
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub quantity: Option<Decimal>,
    pub initial_price: Option<Decimal>,
    pub display_chart: bool,
}

/// Fields a user may edit on an existing position. Quote fields and
/// timestamps are owned by the refresh workflow, not by edits.
#[derive(Debug, Clone)]
pub struct PositionPatch {
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub quantity: Option<Decimal>,
    pub initial_price: Option<Decimal>,
    pub display_chart: bool,
}

/// One symbol's freshly fetched price data, ready to persist.
#[derive(Debug, Clone)]
pub struct QuoteUpdate {
    pub id: Uuid,
    pub current_price: Option<Decimal>,
    pub current_change: Option<Decimal>,
}

/// All positions, ordered by name for a stable table view. Symbols are
/// unique, so callers may index the result by symbol.
pub async fn get_all(pool: &PgPool) -> anyhow::Result<Vec<Position>> {
    let positions = sqlx::query_as::<_, Position>(
        "SELECT * FROM positions ORDER BY name ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(positions)
}

/// Most recent successful quote update across all positions. When nothing
/// was ever updated, report 24 hours ago so the first view refreshes.
pub async fn get_last_update(pool: &PgPool) -> anyhow::Result<DateTime<Utc>> {
    let row: (Option<DateTime<Utc>>,) = sqlx::query_as(
        "SELECT MAX(updated_at) FROM positions",
    )
    .fetch_one(pool)
    .await?;

    Ok(row.0.unwrap_or_else(|| Utc::now() - Duration::hours(24)))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Position>> {
    let position = sqlx::query_as::<_, Position>(
        "SELECT * FROM positions WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(position)
}

/// Insert a new position. A duplicate symbol is rejected at this boundary.
pub async fn insert(pool: &PgPool, new: &NewPosition) -> Result<Position, AppError> {
    let result = sqlx::query_as::<_, Position>(
        r#"
        INSERT INTO positions (symbol, name, currency, quantity, initial_price, display_chart)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&new.symbol)
    .bind(&new.name)
    .bind(&new.currency)
    .bind(new.quantity)
    .bind(new.initial_price)
    .bind(new.display_chart)
    .fetch_one(pool)
    .await;

    match result {
        Ok(position) => Ok(position),
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Err(AppError::Conflict(format!(
                "Position for symbol {} already exists",
                new.symbol
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Apply a user edit. Returns None when the id is unknown.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    patch: &PositionPatch,
) -> Result<Option<Position>, AppError> {
    let result = sqlx::query_as::<_, Position>(
        r#"
        UPDATE positions
        SET symbol = $2, name = $3, currency = $4, quantity = $5,
            initial_price = $6, display_chart = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&patch.symbol)
    .bind(&patch.name)
    .bind(&patch.currency)
    .bind(patch.quantity)
    .bind(patch.initial_price)
    .bind(patch.display_chart)
    .fetch_optional(pool)
    .await;

    match result {
        Ok(position) => Ok(position),
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            Err(AppError::Conflict(format!(
                "Position for symbol {} already exists",
                patch.symbol
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Persist one refresh cycle's price updates in a single transaction.
/// Positions absent from `updates` keep their previous data.
pub async fn apply_quotes(
    pool: &PgPool,
    updates: &[QuoteUpdate],
    updated_at: DateTime<Utc>,
) -> anyhow::Result<u64> {
    if updates.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut touched = 0u64;

    for update in updates {
        let result = sqlx::query(
            r#"
            UPDATE positions
            SET current_price = $2, current_change = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(update.id)
        .bind(update.current_price)
        .bind(update.current_change)
        .bind(updated_at)
        .execute(&mut *tx)
        .await?;

        touched += result.rows_affected();
    }

    tx.commit().await?;
    Ok(touched)
}

/// Store-level delete. Returns false when the id is unknown.
pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM positions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
