//! Static reference data for the transparency platform: countries, balancing
//! zones, market areas, indicators and the region/neighbour maps, plus the
//! resolver that turns raw strings into canonical entries.

mod area;
mod balancing_zone;
mod country;
mod indicator;
mod lookup;
mod region;

pub use area::Area;
pub use balancing_zone::BalancingZone;
pub use country::Country;
pub use indicator::Indicator;
pub use lookup::{resolve, IntoReference, LookupError, Reference};
pub use region::{neighbours, region_key};
