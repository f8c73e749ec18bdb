//! Daily-to-monthly summary aggregation.
//!
//! The one genuinely algorithmic transform in the crate: collapse a
//! `{date, value}` column into one row per calendar month carrying
//! first/last/min/max/mean/median/sum and the 25th/75th linear-
//! interpolation quantiles of the values observed that month.

use super::DATE_COL;
use crate::error::DataError;
use polars::prelude::*;

/// The statistic prefixes produced per value column, in output order.
pub const MONTHLY_STATS: [&str; 9] = [
    "first",
    "last",
    "min",
    "max",
    "mean",
    "median",
    "sum",
    "quantile_25",
    "quantile_75",
];

/// Aggregate a daily `{date, value}` column into monthly statistics.
///
/// Rows need not arrive sorted; the transform sorts ascending by date
/// before grouping, so `first`/`last` always mean chronologically
/// earliest/latest within the month. Rows with a null date or a null
/// value contribute nothing, and a month whose every value is null
/// produces no output row at all.
///
/// The output key column is named `date` and holds the first day of
/// each month (dtype Date); statistic columns are named
/// `<stat>_<value_column>`.
///
/// # Errors
///
/// - [`DataError::InvalidColumn`] if `value_column` (or `date`) is
///   missing, or `value_column` is the date column itself.
/// - [`DataError::EmptyInput`] if no rows survive null filtering.
pub fn aggregate_monthly(df: &DataFrame, value_column: &str) -> Result<DataFrame, DataError> {
    if value_column == DATE_COL {
        return Err(DataError::InvalidColumn(value_column.to_string()));
    }
    if df.column(value_column).is_err() {
        return Err(DataError::InvalidColumn(value_column.to_string()));
    }
    if df.column(DATE_COL).is_err() {
        return Err(DataError::InvalidColumn(DATE_COL.to_string()));
    }

    let value = || col(value_column);

    let monthly = df
        .clone()
        .lazy()
        .select([col(DATE_COL), value()])
        .filter(col(DATE_COL).is_not_null().and(value().is_not_null()))
        // Stable sort: first/last mean earliest/latest date, with input
        // order as the tie-break for duplicate dates.
        .sort(
            [DATE_COL],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .with_column(col(DATE_COL).dt().truncate(lit("1mo")))
        .group_by([col(DATE_COL)])
        .agg([
            value().first().name().prefix("first_"),
            value().last().name().prefix("last_"),
            value().min().name().prefix("min_"),
            value().max().name().prefix("max_"),
            value().mean().name().prefix("mean_"),
            value().median().name().prefix("median_"),
            value().sum().name().prefix("sum_"),
            value()
                .quantile(lit(0.25), QuantileMethod::Linear)
                .name()
                .prefix("quantile_25_"),
            value()
                .quantile(lit(0.75), QuantileMethod::Linear)
                .name()
                .prefix("quantile_75_"),
        ])
        .sort([DATE_COL], SortMultipleOptions::default())
        .collect()
        .map_err(|e| DataError::Frame(format!("monthly aggregation of '{value_column}': {e}")))?;

    if monthly.height() == 0 {
        return Err(DataError::EmptyInput);
    }

    Ok(monthly)
}
