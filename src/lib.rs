//! macroframe — heterogeneous economic and market series as one table.
//!
//! This crate pulls two kinds of external data into Polars frames:
//! - Economic time series from FRED (the St. Louis Fed statistics API)
//! - Daily equity price history from a market data provider
//!
//! Each series becomes a `{date, value}` frame; daily series can be
//! summarized into monthly statistics (first/last/min/max/mean/median/
//! sum/quartiles per calendar month); everything joins into one wide,
//! date-aligned table via a coalescing full outer join.
//!
//! All transforms are pure and in-memory. Fetches are blocking HTTP,
//! one request per series or ticker, with failures propagated as
//! [`DataError`] — no retries, no caching.

pub mod error;
pub mod frame;
pub mod fred;
pub mod yahoo;

pub use error::DataError;
pub use frame::{
    aggregate_monthly, build_daily_table, join_series, join_series_monthly, monthly_from_daily,
    outer_join_on_date, Cadence, SeriesFrame,
};
pub use fred::{FredClient, Observation, SeriesDetails};
pub use yahoo::{PriceClient, RawPrice};
