//! Structured error types for fetch and frame operations.

use thiserror::Error;

/// Error taxonomy for the whole pipeline.
///
/// Nothing is silently swallowed: fetch and parse failures propagate to
/// the caller unmodified, and the only automatic correction anywhere is
/// the documented mapping of the provider's `"."` sentinel to null.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network or HTTP-status failure while talking to a provider.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Response body did not match the provider's documented shape,
    /// or a date/value field could not be parsed.
    #[error("unexpected response shape: {0}")]
    Parse(String),

    /// An operation was asked to work on a column the frame lacks.
    #[error("no such column: '{0}'")]
    InvalidColumn(String),

    /// Zero usable rows after null filtering; aggregation has nothing
    /// to summarize. This is always an error, never an empty frame.
    #[error("no usable rows after filtering")]
    EmptyInput,

    /// A frame transform failed inside the query engine.
    #[error("frame operation failed: {0}")]
    Frame(String),
}
