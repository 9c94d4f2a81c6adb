//! Response normalization: envelope extraction, column naming, dtype
//! inference and the endpoint-specific post-processing.

mod frame;
mod parsers;
mod snake;

pub(crate) use frame::merge_frames;
pub(crate) use parsers::{parse_aggregated_data, parse_general, parse_interconnections, project};

pub use parsers::GroupBy;
pub use snake::to_snake_case;
