use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the positions table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Position {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub quantity: Option<Decimal>,
    pub initial_price: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub current_change: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub display_chart: bool,
}

// A metric is None, never zero, when a required input is null or zero.
fn present(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

impl Position {
    /// Money put into this position.
    pub fn investment(&self) -> Option<Decimal> {
        let quantity = present(self.quantity)?;
        let initial = present(self.initial_price)?;
        // normalize() drops the scale picked up from NUMERIC columns, so
        // 50.00000000 renders as 50.
        Some((quantity * initial).normalize())
    }

    /// Current market value of the holding.
    ///
    /// Also requires `initial_price`, even though the formula does not use
    /// it: a position without a cost basis has no value row in the panel.
    pub fn current_value(&self) -> Option<Decimal> {
        let quantity = present(self.quantity)?;
        present(self.initial_price)?;
        let current = present(self.current_price)?;
        Some((quantity * current).normalize())
    }

    pub fn profit(&self) -> Option<Decimal> {
        Some((self.current_value()? - self.investment()?).normalize())
    }

    /// Profit as a fraction of the investment. None when the investment is
    /// undefined or zero.
    pub fn profit_percent(&self) -> Option<Decimal> {
        let investment = self.investment()?;
        if investment.is_zero() {
            return None;
        }
        Some((self.profit()? / investment).normalize())
    }

    /// Intraday change as a fraction of the previous reference price.
    /// Zero when the previous price works out to zero.
    pub fn current_change_percent(&self) -> Option<Decimal> {
        let current = self.current_price?;
        let change = self.current_change?;
        let old_price = current - change;
        if old_price.is_zero() {
            return Some(Decimal::ZERO);
        }
        Some((change / old_price).normalize())
    }
}
