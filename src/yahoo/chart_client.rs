use reqwest::Client;

use crate::models::{ChartRange, ChartSeries, PricePoint, VolumePoint};

use super::types::{ChartEnvelope, IndicatorQuote};
use super::YahooError;

/// Historical OHLCV lookups against the v8 chart endpoint. Stateless, one
/// symbol per call, no retry: a failure here surfaces to the caller as
/// "data unavailable".
#[derive(Debug, Clone)]
pub struct ChartClient {
    http: Client,
    base_url: String,
}

impl ChartClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub async fn chart(
        &self,
        symbol: &str,
        range: ChartRange,
    ) -> Result<ChartSeries, YahooError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("range", range.as_str()),
                ("includePrePost", "false"),
                ("interval", range.interval()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: ChartEnvelope = resp.json().await?;
        build_series(envelope)
    }
}

fn build_series(envelope: ChartEnvelope) -> Result<ChartSeries, YahooError> {
    let result = envelope
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| YahooError::MissingData("chart result".into()))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| YahooError::MissingData("timestamps".into()))?;

    let quote: IndicatorQuote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    // Closing prices are the one series the panel cannot render without.
    let closes = quote
        .close
        .ok_or_else(|| YahooError::MissingData("closing prices".into()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let at = |series: &Vec<Option<f64>>, index: usize| series.get(index).copied().flatten();

    let mut price = Vec::with_capacity(timestamps.len());
    let mut volume = Vec::with_capacity(timestamps.len());

    for (index, ts) in timestamps.iter().enumerate() {
        let ts_ms = ts * 1000;
        price.push(PricePoint(
            ts_ms,
            at(&opens, index),
            at(&highs, index),
            at(&lows, index),
            at(&closes, index),
        ));
        volume.push(VolumePoint(ts_ms, at(&volumes, index)));
    }

    Ok(ChartSeries { price, volume })
}
