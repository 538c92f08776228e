use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Chart time span requested by the UI. Each range has a fixed sampling
/// interval understood by the chart API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartRange {
    OneDay,
    FiveDays,
    OneMonth,
    SixMonths,
    YearToDate,
    OneYear,
    FiveYears,
    Max,
}

impl ChartRange {
    pub fn interval(&self) -> &'static str {
        match self {
            ChartRange::OneDay => "2m",
            ChartRange::FiveDays => "15m",
            ChartRange::OneMonth => "1h",
            ChartRange::SixMonths => "1d",
            ChartRange::YearToDate => "1wk",
            ChartRange::OneYear => "1wk",
            ChartRange::FiveYears => "1mo",
            ChartRange::Max => "1mo",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::OneDay => "1d",
            ChartRange::FiveDays => "5d",
            ChartRange::OneMonth => "1mo",
            ChartRange::SixMonths => "6mo",
            ChartRange::YearToDate => "ytd",
            ChartRange::OneYear => "1y",
            ChartRange::FiveYears => "5y",
            ChartRange::Max => "max",
        }
    }
}

impl FromStr for ChartRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(ChartRange::OneDay),
            "5d" => Ok(ChartRange::FiveDays),
            "1mo" => Ok(ChartRange::OneMonth),
            "6mo" => Ok(ChartRange::SixMonths),
            "ytd" => Ok(ChartRange::YearToDate),
            "1y" => Ok(ChartRange::OneYear),
            "5y" => Ok(ChartRange::FiveYears),
            "max" => Ok(ChartRange::Max),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candle: `[timestamp_ms, open, high, low, close]`. Serialized as a
/// plain JSON array for direct consumption by the charting frontend.
#[derive(Debug, Clone, Serialize)]
pub struct PricePoint(
    pub i64,
    pub Option<f64>,
    pub Option<f64>,
    pub Option<f64>,
    pub Option<f64>,
);

/// One volume bar: `[timestamp_ms, volume]`.
#[derive(Debug, Clone, Serialize)]
pub struct VolumePoint(pub i64, pub Option<f64>);

/// Parallel price and volume series for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub price: Vec<PricePoint>,
    pub volume: Vec<VolumePoint>,
}
