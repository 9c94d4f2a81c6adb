use chrono::{DateTime, Utc};
use polars::error::PolarsError;
use thiserror::Error;

use crate::mappings::LookupError;
use crate::raw::RequestError;

/// Any error a query can surface to the caller.
#[derive(Debug, Error)]
pub enum EntsogError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Frame(#[from] PolarsError),

    /// Every chunk, page or operator of a logical query came back empty.
    #[error("no matching data found for any part of the query")]
    NoMatchingData,

    /// Bisection hit its depth bound or a window too narrow to split while
    /// the platform kept reporting too much data.
    #[error("window {start}..{end} still exceeds the pagination limit and cannot be reduced further")]
    WindowNotReducible {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid range: end {end} precedes start {start}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The response body could not be interpreted as a record envelope.
    #[error("malformed response payload: {0}")]
    Payload(String),
}

impl EntsogError {
    /// True for both the per-request signal and the aggregate outcome, so
    /// outer policy layers can skip inner no-data results uniformly.
    pub(crate) fn is_no_data(&self) -> bool {
        matches!(
            self,
            EntsogError::NoMatchingData | EntsogError::Request(RequestError::NoMatchingData)
        )
    }
}
