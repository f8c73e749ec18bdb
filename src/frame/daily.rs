//! Daily price table construction.

use super::{date_column, DATE_COL};
use crate::error::DataError;
use crate::yahoo::RawPrice;
use polars::prelude::*;

/// Build the uniform daily price table from raw provider records.
///
/// Columns, in order: `date`, `volume`, `open`, `close`, `high`, `low`,
/// `high-low`, `close-open`; sorted ascending by date. The derived
/// spread columns propagate null when either operand is missing — the
/// row itself is kept.
pub fn build_daily_table(records: &[RawPrice]) -> Result<DataFrame, DataError> {
    let dates: Vec<_> = records.iter().map(|r| r.date).collect();
    let volumes: Vec<Option<u64>> = records.iter().map(|r| r.volume).collect();
    let opens: Vec<Option<f64>> = records.iter().map(|r| r.open).collect();
    let closes: Vec<Option<f64>> = records.iter().map(|r| r.close).collect();
    let highs: Vec<Option<f64>> = records.iter().map(|r| r.high).collect();
    let lows: Vec<Option<f64>> = records.iter().map(|r| r.low).collect();

    let df = DataFrame::new(vec![
        date_column(DATE_COL, &dates)?,
        Column::new("volume".into(), volumes),
        Column::new("open".into(), opens),
        Column::new("close".into(), closes),
        Column::new("high".into(), highs),
        Column::new("low".into(), lows),
    ])
    .map_err(|e| DataError::Frame(format!("daily table creation: {e}")))?;

    df.lazy()
        .with_columns([
            (col("high") - col("low")).alias("high-low"),
            (col("close") - col("open")).alias("close-open"),
        ])
        .sort([DATE_COL], SortMultipleOptions::default())
        .collect()
        .map_err(|e| DataError::Frame(format!("daily table transform: {e}")))
}
