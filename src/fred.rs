//! FRED (St. Louis Fed) statistics API client.
//!
//! Holds the API key explicitly — there is no process-wide
//! configuration. Each series costs two blocking requests: one for the
//! observations and one for the title/frequency metadata that labels
//! the resulting column. The provider marks missing observations with
//! the literal string `"."`; that sentinel becomes null, never `0.0`.

use crate::error::DataError;
use crate::frame::{self, date_column, Cadence, SeriesFrame, DATE_COL};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// The provider's "no data" marker inside an observation value.
const MISSING_SENTINEL: &str = ".";

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    seriess: Vec<SeriesDetails>,
}

/// Metadata used to label a series column.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesDetails {
    pub title: String,
    pub frequency: String,
}

/// One economic observation: a calendar date and a possibly-missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Blocking client for the statistics provider.
pub struct FredClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl FredClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DataError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different endpoint (stub servers in tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Fetch every observation available for a series.
    pub fn observations(&self, series_id: &str) -> Result<Vec<Observation>, DataError> {
        let url = format!(
            "{}/series/observations?series_id={series_id}&api_key={}&file_type=json",
            self.base_url, self.api_key
        );
        let body: ObservationsResponse = self.get_json(&url, series_id)?;
        body.observations.iter().map(parse_observation).collect()
    }

    /// Fetch the title/frequency metadata for a series.
    pub fn series_details(&self, series_id: &str) -> Result<SeriesDetails, DataError> {
        let url = format!(
            "{}/series?series_id={series_id}&api_key={}&file_type=json",
            self.base_url, self.api_key
        );
        let body: SeriesResponse = self.get_json(&url, series_id)?;
        body.seriess
            .into_iter()
            .next()
            .ok_or_else(|| DataError::Parse(format!("no series metadata for {series_id}")))
    }

    /// Fetch a series as a labeled, cadence-tagged `{date, value}` frame.
    ///
    /// The column is named `"<title> (<frequency>)"` and the cadence tag
    /// is decided here, from the frequency metadata — downstream code
    /// never re-derives it from the label.
    pub fn series_frame(&self, series_id: &str) -> Result<SeriesFrame, DataError> {
        let details = self.series_details(series_id)?;
        let observations = self.observations(series_id)?;

        let name = format!("{} ({})", details.title, details.frequency);
        let frame = observations_frame(&observations, &name)?;

        Ok(SeriesFrame {
            name,
            cadence: Cadence::from_frequency(&details.frequency),
            frame,
        })
    }

    /// Fetch several series and outer-join them into one wide table on
    /// the date key, sorted ascending.
    pub fn wide_frame(&self, series_ids: &[&str]) -> Result<DataFrame, DataError> {
        frame::join_series(&self.fetch_all(series_ids)?)
    }

    /// Fetch several series and join them at monthly granularity: daily
    /// series are summarized into monthly statistics first, coarser
    /// series pass through on their native dates.
    pub fn monthly_frame(&self, series_ids: &[&str]) -> Result<DataFrame, DataError> {
        frame::join_series_monthly(&self.fetch_all(series_ids)?)
    }

    fn fetch_all(&self, series_ids: &[&str]) -> Result<Vec<SeriesFrame>, DataError> {
        series_ids
            .iter()
            .map(|id| self.series_frame(id))
            .collect()
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        series_id: &str,
    ) -> Result<T, DataError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::Fetch(format!("request for {series_id} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::Fetch(format!("HTTP {status} for {series_id}")));
        }

        resp.json()
            .map_err(|e| DataError::Parse(format!("response for {series_id}: {e}")))
    }
}

/// Parse one wire observation, mapping the missing-value sentinel to null.
fn parse_observation(raw: &RawObservation) -> Result<Observation, DataError> {
    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
        .map_err(|e| DataError::Parse(format!("bad observation date '{}': {e}", raw.date)))?;

    let value = if raw.value == MISSING_SENTINEL {
        None
    } else {
        Some(raw.value.parse::<f64>().map_err(|e| {
            DataError::Parse(format!("bad observation value '{}': {e}", raw.value))
        })?)
    };

    Ok(Observation { date, value })
}

/// Build the `{date, <label>}` frame for a series.
pub fn observations_frame(
    observations: &[Observation],
    label: &str,
) -> Result<DataFrame, DataError> {
    let dates: Vec<NaiveDate> = observations.iter().map(|o| o.date).collect();
    let values: Vec<Option<f64>> = observations.iter().map(|o| o.value).collect();

    DataFrame::new(vec![
        date_column(DATE_COL, &dates)?,
        Column::new(label.into(), values),
    ])
    .map_err(|e| DataError::Frame(format!("series frame creation: {e}")))
}
