//! Wide-table assembly via coalescing full outer joins.

use super::DATE_COL;
use crate::error::DataError;
use polars::prelude::*;

/// Outer-join frames pairwise on the `date` key.
///
/// The key is coalesced into a single column; value columns keep the
/// first-seen order of the inputs. The result holds the union of all
/// keys and is sorted ascending by `date`.
///
/// # Errors
///
/// [`DataError::EmptyInput`] when called with no frames;
/// [`DataError::Frame`] if any input lacks a `date` column or the join
/// itself fails.
pub fn outer_join_on_date(frames: Vec<DataFrame>) -> Result<DataFrame, DataError> {
    let mut iter = frames.into_iter();
    let first = iter.next().ok_or(DataError::EmptyInput)?;

    let joined = iter.fold(first.lazy(), |acc, frame| {
        acc.join(
            frame.lazy(),
            [col(DATE_COL)],
            [col(DATE_COL)],
            JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
        )
    });

    joined
        .sort([DATE_COL], SortMultipleOptions::default())
        .collect()
        .map_err(|e| DataError::Frame(format!("outer join on '{DATE_COL}': {e}")))
}
