use log::debug;
use polars::prelude::DataFrame;

use crate::chunking::{blocks, ChunkUnit, Window};
use crate::error::EntsogError;
use crate::normalize::merge_frames;

/// Runs `call` once per calendar-aligned block of `window` and merges the
/// results chronologically.
///
/// A block with no matching data is skipped with a log line; the query only
/// fails when every block came back empty. Rows duplicated across block
/// boundaries are dropped during the merge.
pub(crate) fn chunked<F>(window: Window, unit: ChunkUnit, call: F) -> Result<DataFrame, EntsogError>
where
    F: Fn(Window) -> Result<DataFrame, EntsogError>,
{
    let mut frames = Vec::new();
    for block in blocks(window, unit) {
        match call(block) {
            Ok(frame) => frames.push(frame),
            Err(error) if error.is_no_data() => {
                debug!(
                    "no matching data between {} and {}",
                    block.start(),
                    block.end()
                );
            }
            Err(error) => return Err(error),
        }
    }
    if frames.is_empty() {
        return Err(EntsogError::NoMatchingData);
    }
    merge_frames(frames, true)
}

/// Runs `call` once per operator with the same partial-failure policy as
/// [`chunked`]. No deduplication: operators do not share rows.
pub(crate) fn per_operator<F>(operators: &[String], call: F) -> Result<DataFrame, EntsogError>
where
    F: Fn(&str) -> Result<DataFrame, EntsogError>,
{
    let mut frames = Vec::new();
    for operator in operators {
        match call(operator) {
            Ok(frame) => frames.push(frame),
            Err(error) if error.is_no_data() => {
                debug!("no matching data for operator {operator}");
            }
            Err(error) => return Err(error),
        }
    }
    if frames.is_empty() {
        return Err(EntsogError::NoMatchingData);
    }
    merge_frames(frames, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RequestError;
    use chrono::{DateTime, TimeZone, Utc};
    use polars::df;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn no_data() -> EntsogError {
        EntsogError::Request(RequestError::NoMatchingData)
    }

    fn day_frame(day: u32, url: &str) -> DataFrame {
        df!(
            "period_from" => [format!("2021-01-{day:02}")],
            "value" => [f64::from(day)],
            "url" => [url]
        )
        .unwrap()
    }

    #[test]
    fn one_empty_chunk_among_three_still_succeeds() {
        let window = Window::new(utc(2021, 1, 1), utc(2021, 1, 4)).unwrap();
        let result = chunked(window, ChunkUnit::Day, |block| {
            let day = block.start().format("%d").to_string().parse::<u32>().unwrap();
            if day == 2 {
                Err(no_data())
            } else {
                Ok(day_frame(day, "https://x"))
            }
        })
        .unwrap();
        assert_eq!(result.height(), 2);
    }

    #[test]
    fn all_chunks_empty_is_a_fatal_no_matching_data() {
        let window = Window::new(utc(2021, 1, 1), utc(2021, 1, 4)).unwrap();
        let result = chunked(window, ChunkUnit::Day, |_| Err(no_data()));
        assert!(matches!(result, Err(EntsogError::NoMatchingData)));
    }

    #[test]
    fn other_errors_abort_the_whole_query() {
        let window = Window::new(utc(2021, 1, 1), utc(2021, 1, 4)).unwrap();
        let result = chunked(window, ChunkUnit::Day, |_| {
            Err(EntsogError::Request(RequestError::Unauthorized))
        });
        assert!(matches!(
            result,
            Err(EntsogError::Request(RequestError::Unauthorized))
        ));
    }

    #[test]
    fn boundary_rows_are_deduplicated_across_chunks() {
        let window = Window::new(utc(2021, 1, 1), utc(2021, 1, 3)).unwrap();
        // Both chunks return the same row; the provenance URL differs, which
        // must not defeat deduplication.
        let result = chunked(window, ChunkUnit::Day, |block| {
            Ok(day_frame(1, &format!("https://x?from={}", block.start())))
        })
        .unwrap();
        assert_eq!(result.height(), 1);
    }

    #[test]
    fn operators_without_data_are_skipped() {
        let operators = vec!["BE-TSO-0001".to_string(), "NL-TSO-0001".to_string()];
        let result = per_operator(&operators, |operator| {
            if operator.starts_with("BE") {
                Err(no_data())
            } else {
                Ok(day_frame(1, "https://x"))
            }
        })
        .unwrap();
        assert_eq!(result.height(), 1);
    }

    #[test]
    fn no_operator_with_data_is_fatal() {
        let operators = vec!["BE-TSO-0001".to_string()];
        let result = per_operator(&operators, |_| Err(no_data()));
        assert!(matches!(result, Err(EntsogError::NoMatchingData)));
    }
}
