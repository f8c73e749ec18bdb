//! Market price data provider client.
//!
//! Fetches the full daily OHLCV history for a ticker. The provider
//! answers with a map keyed by ticker whose `prices` list carries one
//! raw record per trading day; any of the OHLCV fields may be absent
//! for non-trading days or data gaps, and that absence is preserved as
//! null rather than patched over.
//!
//! One blocking request per ticker, no retry policy: a failure is the
//! caller's to handle.

use crate::error::DataError;
use crate::frame::{build_daily_table, monthly_from_daily};
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com/v11/finance/history";

/// History responses are keyed by the requested ticker.
type HistoryResponse = HashMap<String, TickerHistory>;

#[derive(Debug, Deserialize)]
struct TickerHistory {
    prices: Vec<RawPriceRecord>,
}

/// One wire-format record. The provider also transmits an epoch-seconds
/// `date` field duplicating `formatted_date`; it is not deserialized.
#[derive(Debug, Deserialize)]
struct RawPriceRecord {
    formatted_date: String,
    #[serde(default)]
    open: Option<f64>,
    #[serde(default)]
    high: Option<f64>,
    #[serde(default)]
    low: Option<f64>,
    #[serde(default)]
    close: Option<f64>,
    #[serde(default)]
    volume: Option<u64>,
}

/// A parsed daily price record, date already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrice {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

/// Blocking client for the price provider.
pub struct PriceClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PriceClient {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (stub servers in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the history URL for a ticker over the full available range.
    fn history_url(&self, ticker: &str) -> String {
        let start = "1900-01-01";
        let end = chrono::Utc::now().date_naive();
        format!(
            "{}/{ticker}?start={start}&end={end}&interval=daily",
            self.base_url
        )
    }

    /// Fetch the full daily price history for a ticker.
    pub fn history(&self, ticker: &str) -> Result<Vec<RawPrice>, DataError> {
        let url = self.history_url(ticker);
        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::Fetch(format!("request for {ticker} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Fetch(format!("HTTP {status} for {ticker}")));
        }

        let body: HistoryResponse = resp
            .json()
            .map_err(|e| DataError::Parse(format!("history response for {ticker}: {e}")))?;

        Self::parse_history(ticker, body)
    }

    /// Fetch and tabulate the uniform daily price table for a ticker.
    pub fn daily_frame(&self, ticker: &str) -> Result<DataFrame, DataError> {
        build_daily_table(&self.history(ticker)?)
    }

    /// Fetch a ticker's history and summarize every value column into
    /// monthly statistics, joined on the month key.
    pub fn monthly_frame(&self, ticker: &str) -> Result<DataFrame, DataError> {
        monthly_from_daily(&self.daily_frame(ticker)?)
    }

    /// Pull the requested ticker's records out of the response map and
    /// validate their dates.
    fn parse_history(
        ticker: &str,
        mut body: HistoryResponse,
    ) -> Result<Vec<RawPrice>, DataError> {
        let history = body
            .remove(ticker)
            .ok_or_else(|| DataError::Parse(format!("no history entry for {ticker}")))?;

        history
            .prices
            .into_iter()
            .map(|rec| {
                let date = NaiveDate::parse_from_str(&rec.formatted_date, "%Y-%m-%d")
                    .map_err(|e| {
                        DataError::Parse(format!("bad date '{}': {e}", rec.formatted_date))
                    })?;
                Ok(RawPrice {
                    date,
                    open: rec.open,
                    high: rec.high,
                    low: rec.low,
                    close: rec.close,
                    volume: rec.volume,
                })
            })
            .collect()
    }
}
