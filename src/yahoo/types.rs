//! Wire models for the Yahoo Finance endpoints we consume. Only the fields
//! the panel needs are declared; everything else in the payloads is ignored.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Quote;

// ---------------------------------------------------------------------------
// v7/finance/quote
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    pub quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub result: Vec<WireQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireQuote {
    pub symbol: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<Decimal>,
    #[serde(default)]
    pub regular_market_time: Option<i64>,
    #[serde(default)]
    pub regular_market_change: Option<Decimal>,
    #[serde(default)]
    pub post_market_price: Option<Decimal>,
    #[serde(default)]
    pub post_market_time: Option<i64>,
    #[serde(default)]
    pub post_market_change: Option<Decimal>,
}

impl From<WireQuote> for Quote {
    fn from(wire: WireQuote) -> Self {
        Quote {
            symbol: wire.symbol,
            long_name: wire.long_name.or(wire.short_name),
            regular_market_price: wire.regular_market_price,
            regular_market_time: wire.regular_market_time,
            regular_market_change: wire.regular_market_change,
            post_market_price: wire.post_market_price,
            post_market_time: wire.post_market_time,
            post_market_change: wire.post_market_change,
        }
    }
}

// ---------------------------------------------------------------------------
// v8/finance/chart
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartOuter,
}

#[derive(Debug, Deserialize)]
pub struct ChartOuter {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<IndicatorQuote>,
}

/// OHLCV arrays parallel to `timestamp`. Individual entries may be null
/// and whole arrays may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct IndicatorQuote {
    #[serde(default)]
    pub open: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub high: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub low: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub volume: Option<Vec<Option<f64>>>,
}

// ---------------------------------------------------------------------------
// v1/finance/search
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub quotes: Vec<WireSearchQuote>,
}

#[derive(Debug, Deserialize)]
pub struct WireSearchQuote {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub shortname: Option<String>,
    #[serde(default)]
    pub longname: Option<String>,
    #[serde(default, rename = "exchDisp")]
    pub exch_disp: Option<String>,
}
