//! Endpoint-specific reshaping applied after the generic envelope handling.

use std::sync::LazyLock;

use polars::prelude::*;
use regex::Regex;

use super::frame::{
    extract_records, records_to_frame, snake_case_columns, with_url, URL_COLUMN,
};
use crate::error::EntsogError;
use crate::mappings::region_key;
use crate::raw::Endpoint;

/// Placeholder the platform uses for an absent balancing zone.
const NO_ZONE: &str = "-----------";

static TRANSMISSION_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Transmission(.*)$").unwrap());

/// Envelope extraction, snake_case renaming and URL provenance: the shape
/// every endpoint shares.
pub(crate) fn parse_general(body: &str, url: &str) -> Result<DataFrame, EntsogError> {
    let records = extract_records(body)?;
    let frame = records_to_frame(&records)?;
    let frame = snake_case_columns(frame)?;
    Ok(with_url(frame, url)?)
}

/// Keeps only the endpoint's allow-listed columns (plus provenance) unless
/// the caller asked for the full verbose row.
pub(crate) fn project(
    frame: DataFrame,
    endpoint: Endpoint,
    verbose: bool,
) -> Result<DataFrame, EntsogError> {
    if verbose {
        return Ok(frame);
    }
    let keep: Vec<&str> = endpoint
        .columns()
        .iter()
        .copied()
        .chain([URL_COLUMN])
        .filter(|name| has_column(&frame, name))
        .collect();
    Ok(frame.select(keep)?)
}

/// Interconnections get continental region keys on both ends.
pub(crate) fn parse_interconnections(body: &str, url: &str) -> Result<DataFrame, EntsogError> {
    let frame = parse_general(body, url)?;
    let frame = with_region_column(frame, "from_country_key", "from_region_key")?;
    with_region_column(frame, "to_country_key", "to_region_key")
}

/// Geographic levels aggregated data can be rolled up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Point,
    Operator,
    BalancingZone,
    Country,
    Region,
}

impl GroupBy {
    fn keys(&self) -> &'static [&'static str] {
        match self {
            GroupBy::Point => &[
                "period_from",
                "period_to",
                "region_key",
                "country_key",
                "bz_key",
                "adjacent_bz_key",
                "adjacent_systems_key",
                "adjacent_systems_label",
                "operator_key",
                "points_names",
                "indicator",
                "direction_key",
                "note",
            ],
            GroupBy::Operator => &[
                "period_from",
                "period_to",
                "region_key",
                "country_key",
                "bz_key",
                "adjacent_bz_key",
                "adjacent_systems_key",
                "adjacent_systems_label",
                "operator_key",
                "indicator",
                "direction_key",
                "note",
            ],
            GroupBy::BalancingZone => &[
                "period_from",
                "period_to",
                "region_key",
                "country_key",
                "bz_key",
                "adjacent_bz_key",
                "adjacent_systems_key",
                "adjacent_systems_label",
                "indicator",
                "direction_key",
                "note",
            ],
            GroupBy::Country => &[
                "period_from",
                "period_to",
                "region_key",
                "country_key",
                "adjacent_bz_key",
                "adjacent_systems_key",
                "adjacent_systems_label",
                "indicator",
                "direction_key",
                "note",
            ],
            GroupBy::Region => &[
                "period_from",
                "period_to",
                "region_key",
                "adjacent_bz_key",
                "adjacent_systems_key",
                "adjacent_systems_label",
                "indicator",
                "direction_key",
                "note",
            ],
        }
    }
}

/// Full aggregated-data treatment: region key, adjacent balancing zone,
/// outside-EU labelling via the interconnections table, optional entry/exit
/// netting and optional geographic roll-up.
pub(crate) fn parse_aggregated_data(
    body: &str,
    url: &str,
    interconnections: &DataFrame,
    group_by: Option<GroupBy>,
    entry_exit: bool,
) -> Result<DataFrame, EntsogError> {
    let frame = parse_general(body, url)?;
    let frame = with_region_column(frame, "country_key", "region_key")?;
    let frame = with_adjacent_bz(frame)?;
    let frame = label_outside_eu(frame, interconnections)?;
    let frame = if entry_exit { net_entry_exit(frame)? } else { frame };
    match group_by {
        Some(level) => group_sum(frame, level.keys()),
        None => Ok(frame),
    }
}

fn has_column(frame: &DataFrame, name: &str) -> bool {
    frame
        .get_column_names()
        .iter()
        .any(|column| column.as_str() == name)
}

/// Derives a region-key column from a country-key column. Countries outside
/// the region map yield nulls, same as unknown adjacent systems.
fn with_region_column(
    mut frame: DataFrame,
    source: &str,
    target: &str,
) -> Result<DataFrame, EntsogError> {
    let regions: Vec<Option<&str>> = frame
        .column(source)?
        .str()?
        .into_iter()
        .map(|country| country.and_then(region_key))
        .collect();
    frame.with_column(Column::new(target.into(), regions))?;
    Ok(frame)
}

/// The adjacent balancing zone hides in the `adjacent_systems_key` field as
/// a `Transmission<zone>` suffix; anything else gets the no-zone placeholder.
fn with_adjacent_bz(mut frame: DataFrame) -> Result<DataFrame, EntsogError> {
    let zones: Vec<&str> = frame
        .column("adjacent_systems_key")?
        .str()?
        .into_iter()
        .map(|system| {
            system
                .and_then(|s| TRANSMISSION_TAIL.captures(s))
                .and_then(|captures| captures.get(1))
                .map(|tail| tail.as_str())
                .filter(|tail| !tail.trim().is_empty())
                .unwrap_or(NO_ZONE)
        })
        .collect();
    frame.with_column(Column::new("adjacent_bz_key".into(), zones))?;
    Ok(frame)
}

/// Rows whose adjacent system is the bare `Transmission`/`Transmission` pair
/// describe flows crossing the EU border. Their counterpart is recovered from
/// the interconnections table by point name: the adjacent label becomes the
/// far country and the note names the far operator.
fn label_outside_eu(
    frame: DataFrame,
    interconnections: &DataFrame,
) -> Result<DataFrame, EntsogError> {
    let outside = col("adjacent_systems_key")
        .eq(lit("Transmission"))
        .and(col("adjacent_systems_label").eq(lit("Transmission")));

    let inside_eu = frame
        .clone()
        .lazy()
        .filter(outside.clone().not())
        .with_columns([lit("").alias("note"), lit(false).alias("outside_eu")]);

    let counterparts = interconnections
        .clone()
        .lazy()
        .select([
            col("to_point_label"),
            col("from_country_label").alias("counterpart_country"),
            col("from_operator_label").alias("counterpart_operator"),
        ]);
    let outside_eu = frame
        .lazy()
        .filter(outside)
        .join(
            counterparts,
            [col("points_names")],
            [col("to_point_label")],
            JoinArgs::new(JoinType::Left),
        )
        .with_columns([
            col("counterpart_country").alias("adjacent_systems_label"),
            coalesce(&[col("counterpart_operator"), col("points_names")]).alias("note"),
            lit(true).alias("outside_eu"),
        ])
        .select([col("*").exclude(["counterpart_country", "counterpart_operator"])]);

    let merged = concat_lf_diagonal(
        &[outside_eu, inside_eu],
        UnionArgs::default(),
    )?
    .collect()?;
    Ok(merged)
}

/// Folds entries and exits into one signed series: exits are negated and the
/// direction collapses to `aggregated`.
fn net_entry_exit(frame: DataFrame) -> Result<DataFrame, EntsogError> {
    let netted = frame
        .lazy()
        .with_columns([
            when(col("direction_key").eq(lit("exit")))
                .then(col("value") * lit(-1.0))
                .otherwise(col("value"))
                .alias("value"),
            lit("aggregated").alias("direction_key"),
        ])
        .collect()?;
    Ok(netted)
}

fn group_sum(frame: DataFrame, keys: &[&str]) -> Result<DataFrame, EntsogError> {
    let present: Vec<Expr> = keys
        .iter()
        .filter(|key| has_column(&frame, key))
        .map(|key| col(*key))
        .collect();
    let grouped = frame
        .lazy()
        .group_by(present)
        .agg([col("value").sum()])
        .collect()?;
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregated_frame() -> DataFrame {
        df!(
            "period_from" => ["2021-01-01", "2021-01-01", "2021-01-01"],
            "period_to" => ["2021-01-02", "2021-01-02", "2021-01-02"],
            "indicator" => ["Physical Flow", "Physical Flow", "Physical Flow"],
            "country_key" => ["BE", "BE", "DE"],
            "bz_key" => ["BE-H-ZONE--", "BE-H-ZONE--", "DE-THE-----"],
            "operator_key" => ["BE-TSO-0001", "BE-TSO-0001", "DE-TSO-0001"],
            "adjacent_systems_key" => [
                "TransmissionNL---------",
                "TransmissionNL---------",
                "Transmission"
            ],
            "adjacent_systems_label" => ["Netherlands", "Netherlands", "Transmission"],
            "points_names" => ["Zeebrugge", "Zeebrugge", "Greifswald"],
            "direction_key" => ["entry", "exit", "entry"],
            "value" => [100.0, 40.0, 7.0],
            "url" => ["https://x", "https://x", "https://x"]
        )
        .unwrap()
    }

    fn interconnections_fixture() -> DataFrame {
        df!(
            "to_point_label" => ["Greifswald"],
            "from_country_label" => ["Russia"],
            "from_operator_label" => ["Nord Stream AG"]
        )
        .unwrap()
    }

    #[test]
    fn region_column_is_derived_from_country_keys() {
        let frame = with_region_column(aggregated_frame(), "country_key", "region_key").unwrap();
        let regions: Vec<Option<&str>> =
            frame.column("region_key").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(regions, vec![Some("WE"), Some("WE"), Some("WE")]);
    }

    #[test]
    fn adjacent_bz_extracts_the_transmission_tail() {
        let frame = with_adjacent_bz(aggregated_frame()).unwrap();
        let zones: Vec<Option<&str>> = frame
            .column("adjacent_bz_key")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            zones,
            vec![Some("NL---------"), Some("NL---------"), Some(NO_ZONE)]
        );
    }

    #[test]
    fn outside_eu_rows_get_the_counterpart_country() {
        let frame = label_outside_eu(aggregated_frame(), &interconnections_fixture()).unwrap();
        assert_eq!(frame.height(), 3);
        let by_point = frame
            .column("points_names")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .position(|p| p == Some("Greifswald"))
            .unwrap();
        let labels = frame.column("adjacent_systems_label").unwrap();
        assert_eq!(labels.str().unwrap().get(by_point), Some("Russia"));
        let notes = frame.column("note").unwrap();
        assert_eq!(notes.str().unwrap().get(by_point), Some("Nord Stream AG"));
        let outside: Vec<Option<bool>> =
            frame.column("outside_eu").unwrap().bool().unwrap().into_iter().collect();
        assert_eq!(outside.iter().flatten().filter(|o| **o).count(), 1);
    }

    #[test]
    fn netting_negates_exits_and_collapses_direction() {
        let frame = net_entry_exit(aggregated_frame()).unwrap();
        let values: Vec<Option<f64>> =
            frame.column("value").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(100.0), Some(-40.0), Some(7.0)]);
        let directions = frame.column("direction_key").unwrap();
        assert_eq!(directions.str().unwrap().get(1), Some("aggregated"));
    }

    #[test]
    fn grouping_sums_values_over_the_level_keys() {
        let frame = with_region_column(aggregated_frame(), "country_key", "region_key").unwrap();
        let frame = with_adjacent_bz(frame).unwrap();
        let frame = label_outside_eu(frame, &interconnections_fixture()).unwrap();
        let frame = net_entry_exit(frame).unwrap();
        let grouped = group_sum(frame, GroupBy::Point.keys()).unwrap();
        // Zeebrugge entry and exit collapse into one netted row.
        assert_eq!(grouped.height(), 2);
        let total: f64 = grouped.column("value").unwrap().f64().unwrap().sum().unwrap();
        assert_eq!(total, 67.0);
    }
}
