//! Frame transforms: daily tabulation, monthly aggregation, joining.

pub mod daily;
pub mod join;
pub mod monthly;

pub use daily::build_daily_table;
pub use join::outer_join_on_date;
pub use monthly::aggregate_monthly;

use crate::error::DataError;
use chrono::NaiveDate;
use polars::prelude::*;

/// Name of the key column shared by every frame in the pipeline.
pub const DATE_COL: &str = "date";

/// How often a series records observations.
///
/// Assigned from provider frequency metadata when the series frame is
/// created. Downstream code branches on this tag, never on the column
/// label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One observation per trading/calendar day; eligible for monthly
    /// summary aggregation.
    Daily,
    /// Weekly, monthly, quarterly, annual — already coarse, passed
    /// through as-is.
    Periodic,
}

impl Cadence {
    /// Decide the cadence from provider frequency metadata.
    ///
    /// FRED frequency strings for daily series come in variants like
    /// "Daily" and "Daily, 7-Day", hence the prefix match.
    pub fn from_frequency(frequency: &str) -> Self {
        if frequency.starts_with("Daily") {
            Cadence::Daily
        } else {
            Cadence::Periodic
        }
    }
}

/// A single labeled series: a `{date, <name>}` frame plus its cadence.
#[derive(Debug, Clone)]
pub struct SeriesFrame {
    /// Column label, e.g. `"Federal Funds Effective Rate (Daily)"`.
    pub name: String,
    pub cadence: Cadence,
    /// Two columns: `date` (dtype Date) and the value column under
    /// `name`, sorted ascending by date.
    pub frame: DataFrame,
}

/// Build a polars Date column from chrono dates.
pub(crate) fn date_column(name: &str, dates: &[NaiveDate]) -> Result<Column, DataError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let days: Vec<i32> = dates
        .iter()
        .map(|d| (*d - epoch).num_days() as i32)
        .collect();
    Column::new(name.into(), days)
        .cast(&DataType::Date)
        .map_err(|e| DataError::Frame(format!("date cast: {e}")))
}

/// Join labeled series into one wide table on the date key.
///
/// Union of all dates, first-seen column order, sorted ascending.
pub fn join_series(series: &[SeriesFrame]) -> Result<DataFrame, DataError> {
    outer_join_on_date(series.iter().map(|s| s.frame.clone()).collect())
}

/// Join labeled series into one wide *monthly* table.
///
/// Daily series are summarized with [`aggregate_monthly`] (nine
/// statistic columns each); periodic series keep their native dates
/// with null rows dropped. Monthly aggregation keys are first-of-month
/// dates, so monthly provider series line up without further work.
pub fn join_series_monthly(series: &[SeriesFrame]) -> Result<DataFrame, DataError> {
    let mut frames = Vec::with_capacity(series.len());
    for s in series {
        let frame = match s.cadence {
            Cadence::Daily => aggregate_monthly(&s.frame, &s.name)?,
            Cadence::Periodic => s
                .frame
                .clone()
                .lazy()
                .filter(
                    col(DATE_COL)
                        .is_not_null()
                        .and(col(s.name.as_str()).is_not_null()),
                )
                .collect()
                .map_err(|e| DataError::Frame(format!("drop nulls for '{}': {e}", s.name)))?,
        };
        frames.push(frame);
    }
    outer_join_on_date(frames)
}

/// Summarize every value column of a daily table into monthly
/// statistics and join the results on the month key.
///
/// Column groups appear in the daily table's column order.
pub fn monthly_from_daily(daily: &DataFrame) -> Result<DataFrame, DataError> {
    let monthly: Vec<DataFrame> = daily
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != DATE_COL)
        .map(|name| aggregate_monthly(daily, name.as_str()))
        .collect::<Result<_, _>>()?;
    outer_join_on_date(monthly)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(name: &str, cadence: Cadence, rows: &[(NaiveDate, Option<f64>)]) -> SeriesFrame {
        let dates: Vec<NaiveDate> = rows.iter().map(|(d, _)| *d).collect();
        let values: Vec<Option<f64>> = rows.iter().map(|(_, v)| *v).collect();
        let frame = DataFrame::new(vec![
            date_column(DATE_COL, &dates).unwrap(),
            Column::new(name.into(), values),
        ])
        .unwrap();
        SeriesFrame {
            name: name.to_string(),
            cadence,
            frame,
        }
    }

    #[test]
    fn cadence_comes_from_frequency_metadata() {
        assert_eq!(Cadence::from_frequency("Daily"), Cadence::Daily);
        assert_eq!(Cadence::from_frequency("Daily, 7-Day"), Cadence::Daily);
        assert_eq!(Cadence::from_frequency("Monthly"), Cadence::Periodic);
        assert_eq!(
            Cadence::from_frequency("Weekly, Ending Friday"),
            Cadence::Periodic
        );
    }

    #[test]
    fn join_series_unions_dates_in_first_seen_order() {
        let a = series(
            "a",
            Cadence::Periodic,
            &[(day(2024, 1, 1), Some(1.0)), (day(2024, 2, 1), Some(2.0))],
        );
        let b = series(
            "b",
            Cadence::Periodic,
            &[(day(2024, 2, 1), Some(20.0)), (day(2024, 3, 1), Some(30.0))],
        );

        let wide = join_series(&[a, b]).unwrap();

        assert_eq!(wide.height(), 3);
        assert_eq!(
            wide.get_column_names()
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>(),
            vec![DATE_COL, "a", "b"]
        );
        // 2024-01-01 has no "b" observation
        assert_eq!(wide.column("b").unwrap().f64().unwrap().get(0), None);
    }

    #[test]
    fn join_series_monthly_mixes_cadences() {
        let daily = series(
            "price (Daily)",
            Cadence::Daily,
            &[
                (day(2024, 1, 5), Some(10.0)),
                (day(2024, 1, 20), Some(30.0)),
            ],
        );
        let monthly = series(
            "rate (Monthly)",
            Cadence::Periodic,
            &[(day(2024, 1, 1), Some(5.25)), (day(2024, 2, 1), None)],
        );

        let wide = join_series_monthly(&[daily, monthly]).unwrap();

        // Daily series contributes nine statistic columns keyed on
        // 2024-01-01; the monthly series' null February row is gone.
        assert_eq!(wide.height(), 1);
        assert_eq!(wide.width(), 11);
        let mean = wide
            .column("mean_price (Daily)")
            .unwrap()
            .f64()
            .unwrap()
            .get(0);
        assert_eq!(mean, Some(20.0));
        let rate = wide
            .column("rate (Monthly)")
            .unwrap()
            .f64()
            .unwrap()
            .get(0);
        assert_eq!(rate, Some(5.25));
    }

    #[test]
    fn monthly_from_daily_covers_every_value_column() {
        let dates = vec![day(2024, 1, 2), day(2024, 1, 3)];
        let daily = DataFrame::new(vec![
            date_column(DATE_COL, &dates).unwrap(),
            Column::new("open".into(), vec![Some(1.0), Some(2.0)]),
            Column::new("close".into(), vec![Some(3.0), Some(4.0)]),
        ])
        .unwrap();

        let monthly = monthly_from_daily(&daily).unwrap();

        assert_eq!(monthly.height(), 1);
        // date + 9 stats per value column
        assert_eq!(monthly.width(), 19);
        assert!(monthly.column("first_open").is_ok());
        assert!(monthly.column("quantile_75_close").is_ok());
    }
}
