use chrono::DateTime;
use serde::{Deserialize, Serialize};

//represents a single ohlcv bar of market data
//ohlc consistency is not validated, only the close feeds the indicators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    //epoch milliseconds (utc)
    pub timestamp: i64,
    //date as supplied by the source
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

impl PriceBar {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp: i64,
        date: String,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Self {
        PriceBar {
            timestamp,
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    //returns the iso calendar date of the bar's timestamp
    pub fn iso_date(&self) -> String {
        iso_date(self.timestamp)
    }
}

//formats epoch milliseconds as an iso calendar date (yyyy-mm-dd, utc)
pub fn iso_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

//extracts the close prices of a series
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|bar| bar.close).collect()
}
