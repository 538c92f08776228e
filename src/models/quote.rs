use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One symbol's market snapshot as returned by the quote API.
///
/// Every field except the symbol may be absent; a symbol that never trades
/// after hours simply has no post-market side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub long_name: Option<String>,
    pub regular_market_price: Option<Decimal>,
    pub regular_market_time: Option<i64>,
    pub regular_market_change: Option<Decimal>,
    pub post_market_price: Option<Decimal>,
    pub post_market_time: Option<i64>,
    pub post_market_change: Option<Decimal>,
}

impl Quote {
    // Post-market data wins only when it is strictly newer. A missing
    // post-market timestamp always loses (None < Some in Option's Ord).
    fn post_market_is_newer(&self) -> bool {
        self.post_market_time > self.regular_market_time
    }

    /// The most recent of the regular- and post-market prices.
    pub fn current_price(&self) -> Option<Decimal> {
        if self.post_market_is_newer() {
            self.post_market_price
        } else {
            self.regular_market_price
        }
    }

    /// The change matching [`Quote::current_price`].
    pub fn current_change(&self) -> Option<Decimal> {
        if self.post_market_is_newer() {
            self.post_market_change
        } else {
            self.regular_market_change
        }
    }
}
