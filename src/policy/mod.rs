//! Resilience policies composed around raw calls, outermost to innermost:
//! calendar chunking, pagination bisection, offset paging, transient retry.

mod chunk;
mod paginate;
mod retry;

pub(crate) use chunk::{chunked, per_operator};
pub(crate) use paginate::{bisected, offset_paginated, OffsetPolicy};
pub(crate) use retry::RetryPolicy;
