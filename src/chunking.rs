//! Calendar-aligned decomposition of a query range into sub-windows.
//!
//! The platform rejects queries that span too much data, so long ranges are
//! cut at calendar boundaries (midnight, Monday, the 1st, Jan 1) and the
//! first and last pieces are clipped to the requested ends.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::EntsogError;

/// A half-open time range `[start, end)` with `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Window {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EntsogError> {
        if end < start {
            return Err(EntsogError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub(crate) fn midpoint(&self) -> DateTime<Utc> {
        self.start + (self.end - self.start) / 2
    }
}

/// Granularity at which a window is cut into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkUnit {
    Day,
    Week,
    Month,
    Year,
}

impl ChunkUnit {
    /// The first calendar boundary strictly after `t`.
    fn next_boundary(&self, t: DateTime<Utc>) -> DateTime<Utc> {
        let date = t.date_naive();
        let next = match self {
            ChunkUnit::Day => date + Duration::days(1),
            ChunkUnit::Week => {
                let until_monday = 7 - i64::from(date.weekday().num_days_from_monday());
                date + Duration::days(until_monday)
            }
            ChunkUnit::Month => {
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                first_of(year, month)
            }
            ChunkUnit::Year => first_of(date.year() + 1, 1),
        };
        next.and_time(NaiveTime::MIN).and_utc()
    }
}

fn first_of(year: i32, month: u32) -> NaiveDate {
    // The first of a month is always a representable date.
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid first-of-month date")
}

/// Cuts `window` into contiguous blocks aligned to `unit` boundaries.
///
/// The blocks partition the window exactly: the first starts at
/// `window.start()`, the last ends at `window.end()`, and consecutive blocks
/// share an endpoint. A zero-width window yields itself as the single block.
pub fn blocks(window: Window, unit: ChunkUnit) -> Vec<Window> {
    if window.start == window.end {
        return vec![window];
    }
    let mut cuts = vec![window.start];
    let mut boundary = unit.next_boundary(window.start);
    while boundary < window.end {
        cuts.push(boundary);
        boundary = unit.next_boundary(boundary);
    }
    cuts.push(window.end);
    cuts.windows(2)
        .map(|pair| Window {
            start: pair[0],
            end: pair[1],
        })
        .collect()
}
