//! A blocking client for the ENTSOG transparency platform: European gas
//! flows, capacities, tariffs and market messages as polars `DataFrame`s.
//!
//! Start with [`EntsogClient`]; every endpoint is one builder method on it.
//! Long ranges are split at calendar boundaries, oversized responses are
//! bisected, transient failures retried, and columns normalized to
//! snake_case with a `url` provenance column appended.

mod chunking;
mod entsog;
mod error;
mod mappings;
mod normalize;
mod policy;
mod raw;

pub use chunking::{blocks, ChunkUnit, Window};
pub use entsog::EntsogClient;
pub use error::EntsogError;
pub use mappings::{
    neighbours, region_key, resolve, Area, BalancingZone, Country, Indicator, IntoReference,
    LookupError, Reference,
};
pub use normalize::{to_snake_case, GroupBy};
pub use raw::{PeriodType, RequestError};
