//! The raw request layer: parameter serialization, the blocking transport
//! and response classification. No retries or chunking here.

mod classify;
mod client;
mod endpoints;
mod error;
mod params;

pub(crate) use client::{RawClient, RawResponse};
pub(crate) use endpoints::Endpoint;
pub(crate) use params::QueryParams;

pub use error::RequestError;
pub use params::PeriodType;
