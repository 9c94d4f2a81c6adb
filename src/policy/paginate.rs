use std::thread::sleep;
use std::time::Duration;

use log::debug;
use polars::prelude::DataFrame;

use crate::chunking::Window;
use crate::error::EntsogError;
use crate::normalize::merge_frames;
use crate::raw::RequestError;

/// Recursively halves a window while the platform keeps answering that the
/// requested range holds too many rows, then concatenates the halves in
/// chronological order.
///
/// Recursion stops fatally once `max_depth` splits have been spent or the
/// midpoint no longer separates the endpoints, so a degenerate window that
/// still exceeds the limit cannot recurse forever.
pub(crate) fn bisected<F>(
    window: Window,
    max_depth: u32,
    call: &F,
) -> Result<DataFrame, EntsogError>
where
    F: Fn(Window) -> Result<DataFrame, EntsogError>,
{
    let frames = collect_bisected(window, max_depth, call)?;
    merge_frames(frames, false)
}

fn collect_bisected<F>(
    window: Window,
    depth_left: u32,
    call: &F,
) -> Result<Vec<DataFrame>, EntsogError>
where
    F: Fn(Window) -> Result<DataFrame, EntsogError>,
{
    match call(window) {
        Ok(frame) => Ok(vec![frame]),
        Err(EntsogError::Request(RequestError::PaginationLimit { requested, allowed })) => {
            let pivot = window.midpoint();
            if depth_left == 0 || pivot == window.start() || pivot == window.end() {
                return Err(EntsogError::WindowNotReducible {
                    start: window.start(),
                    end: window.end(),
                });
            }
            debug!(
                "window {}..{} exceeds the pagination limit \
                 ({requested} requested, {allowed} allowed), splitting at {pivot}",
                window.start(),
                window.end()
            );
            let left = Window::new(window.start(), pivot)?;
            let right = Window::new(pivot, window.end())?;
            let mut frames = collect_bisected(left, depth_left - 1, call)?;
            frames.extend(collect_bisected(right, depth_left - 1, call)?);
            Ok(frames)
        }
        Err(error) => Err(error),
    }
}

/// Page stepping for endpoints windowed by document count instead of dates.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OffsetPolicy {
    pub page_size: u64,
    /// Offsets beyond this are never requested.
    pub max_documents: u64,
    /// Pause between pages; the platform rate-limits aggressive paging.
    pub throttle: Duration,
}

/// Walks offsets `0, page_size, 2*page_size, ...` until a no-data or
/// not-found signal ends the stream, concatenating the pages in order.
/// Fatal only when not a single page was retrieved.
pub(crate) fn offset_paginated<F>(policy: OffsetPolicy, call: F) -> Result<DataFrame, EntsogError>
where
    F: Fn(u64) -> Result<DataFrame, EntsogError>,
{
    let mut frames = Vec::new();
    let mut offset = 0;
    while offset <= policy.max_documents {
        match call(offset) {
            Ok(frame) => {
                frames.push(frame);
                sleep(policy.throttle);
            }
            Err(error) if error.is_no_data() => {
                debug!("no matching data at offset {offset}");
                break;
            }
            Err(EntsogError::Request(RequestError::NotFound(url))) => {
                debug!("not found at offset {offset} ({url})");
                break;
            }
            Err(error) => return Err(error),
        }
        offset += policy.page_size;
    }
    if frames.is_empty() {
        return Err(EntsogError::NoMatchingData);
    }
    merge_frames(frames, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use polars::df;
    use std::cell::RefCell;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn limit_error() -> EntsogError {
        EntsogError::Request(RequestError::PaginationLimit {
            requested: 500,
            allowed: 250,
        })
    }

    fn page(label: &str) -> DataFrame {
        df!("point_key" => [label]).unwrap()
    }

    #[test]
    fn one_limit_signal_splits_into_exactly_two_calls() {
        let window = Window::new(utc(2021, 1, 1, 0), utc(2021, 1, 3, 0)).unwrap();
        let seen = RefCell::new(Vec::new());
        let result = bisected(window, 16, &|w: Window| {
            seen.borrow_mut().push((w.start(), w.end()));
            if w == window {
                Err(limit_error())
            } else {
                Ok(page(if w.start() == window.start() { "a" } else { "b" }))
            }
        })
        .unwrap();
        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![
                (utc(2021, 1, 1, 0), utc(2021, 1, 3, 0)),
                (utc(2021, 1, 1, 0), utc(2021, 1, 2, 0)),
                (utc(2021, 1, 2, 0), utc(2021, 1, 3, 0)),
            ]
        );
        // Chronological order survives the merge.
        let points: Vec<Option<&str>> =
            result.column("point_key").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(points, vec![Some("a"), Some("b")]);
    }

    #[test]
    fn depth_bound_stops_a_persistently_limited_window() {
        let window = Window::new(utc(2021, 1, 1, 0), utc(2021, 2, 1, 0)).unwrap();
        let result = bisected(window, 3, &|_| Err(limit_error()));
        assert!(matches!(
            result,
            Err(EntsogError::WindowNotReducible { .. })
        ));
    }

    #[test]
    fn unsplittable_window_is_fatal_regardless_of_depth() {
        let instant = utc(2021, 1, 1, 0);
        let window = Window::new(instant, instant).unwrap();
        let result = bisected(window, 16, &|_| Err(limit_error()));
        assert!(matches!(
            result,
            Err(EntsogError::WindowNotReducible { start, end }) if start == end
        ));
    }

    #[test]
    fn offset_pagination_stops_on_no_data_and_keeps_pages_in_order() {
        let policy = OffsetPolicy {
            page_size: 100,
            max_documents: 1000,
            throttle: Duration::ZERO,
        };
        let result = offset_paginated(policy, |offset| match offset {
            0 => Ok(page("first")),
            100 => Ok(page("second")),
            _ => Err(EntsogError::Request(RequestError::NoMatchingData)),
        })
        .unwrap();
        let points: Vec<Option<&str>> =
            result.column("point_key").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(points, vec![Some("first"), Some("second")]);
    }

    #[test]
    fn offset_pagination_with_zero_pages_is_fatal() {
        let policy = OffsetPolicy {
            page_size: 100,
            max_documents: 1000,
            throttle: Duration::ZERO,
        };
        let result = offset_paginated(policy, |_| {
            Err(EntsogError::Request(RequestError::NoMatchingData))
        });
        assert!(matches!(result, Err(EntsogError::NoMatchingData)));
    }

    #[test]
    fn offset_pagination_respects_the_document_ceiling() {
        let policy = OffsetPolicy {
            page_size: 100,
            max_documents: 250,
            throttle: Duration::ZERO,
        };
        let calls = RefCell::new(0u32);
        let _ = offset_paginated(policy, |_| {
            *calls.borrow_mut() += 1;
            Ok(page("x"))
        });
        // Offsets 0, 100 and 200 are within the ceiling; 300 is not.
        assert_eq!(*calls.borrow(), 3);
    }
}
