//! The main entry point: a blocking client for the ENTSOG transparency
//! platform with one query method per endpoint. Methods return polars
//! `DataFrame`s with snake_case columns and a `url` provenance column.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bon::bon;
use chrono::{DateTime, Utc};
use log::debug;
use polars::prelude::DataFrame;

use crate::chunking::{ChunkUnit, Window};
use crate::error::EntsogError;
use crate::mappings::{BalancingZone, Country, Indicator};
use crate::normalize::{
    parse_aggregated_data, parse_general, parse_interconnections, project, GroupBy,
};
use crate::policy::{bisected, chunked, offset_paginated, per_operator, OffsetPolicy, RetryPolicy};
use crate::raw::{Endpoint, PeriodType, QueryParams, RawClient, RawResponse};

/// A client for the ENTSOG transparency platform.
///
/// Every query is synchronous and blocks until all chunks and pages of the
/// requested range have been fetched. Transient failures are retried with
/// linear backoff; ranges too large for the platform are split at calendar
/// boundaries and, when it still complains, bisected recursively.
///
/// Two reference tables (interconnections and operator point directions) are
/// memoized per client on first use and never refreshed; create a new client
/// to force a reload.
///
/// # Examples
///
/// ```no_run
/// use chrono::{TimeZone, Utc};
/// use entsog::{Country, EntsogClient};
///
/// # fn run() -> Result<(), entsog::EntsogError> {
/// let client = EntsogClient::builder().build()?;
/// let tariffs = client
///     .tariffs()
///     .start(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())
///     .end(Utc.with_ymd_and_hms(2021, 1, 10, 0, 0, 0).unwrap())
///     .country(Country::BE)
///     .call()?;
/// println!("{tariffs}");
/// # Ok(())
/// # }
/// ```
pub struct EntsogClient {
    raw: RawClient,
    retry: RetryPolicy,
    paging: OffsetPolicy,
    max_bisection_depth: u32,
    interconnections: Mutex<Option<DataFrame>>,
    operator_point_directions: Mutex<Option<DataFrame>>,
}

#[bon]
impl EntsogClient {
    /// Builds a client.
    ///
    /// All settings are optional:
    ///
    /// * `.retry_count(u32)`: attempts per request for transient failures. Defaults to `5`.
    /// * `.retry_delay(Duration)`: base backoff; attempt `n` waits `n * retry_delay`. Defaults to 3s.
    /// * `.timeout(Duration)`: per-HTTP-call timeout. Defaults to the HTTP client's own 30s.
    /// * `.proxy(&str)`: proxy URL for all requests.
    /// * `.max_bisection_depth(u32)`: bound on pagination bisection. Defaults to `16`.
    /// * `.page_size(u64)`: documents per page for offset pagination. Defaults to `10_000`.
    /// * `.page_throttle(Duration)`: pause between pages. Defaults to 250ms.
    /// * `.max_documents(u64)`: offset ceiling for paginated endpoints. Defaults to `250_000`.
    #[builder]
    pub fn new(
        retry_count: Option<u32>,
        retry_delay: Option<Duration>,
        timeout: Option<Duration>,
        proxy: Option<&str>,
        max_bisection_depth: Option<u32>,
        page_size: Option<u64>,
        page_throttle: Option<Duration>,
        max_documents: Option<u64>,
    ) -> Result<Self, EntsogError> {
        let raw = RawClient::new(timeout, proxy)?;
        Ok(Self {
            raw,
            retry: RetryPolicy {
                count: retry_count.unwrap_or(5),
                base_delay: retry_delay.unwrap_or(Duration::from_secs(3)),
            },
            paging: OffsetPolicy {
                page_size: page_size.unwrap_or(10_000),
                max_documents: max_documents.unwrap_or(250_000),
                throttle: page_throttle.unwrap_or(Duration::from_millis(250)),
            },
            max_bisection_depth: max_bisection_depth.unwrap_or(16),
            interconnections: Mutex::new(None),
            operator_point_directions: Mutex::new(None),
        })
    }

    /// All connection points of the transmission network.
    #[builder]
    pub fn connection_points(&self, verbose: Option<bool>) -> Result<DataFrame, EntsogError> {
        self.fetch_listing(
            Endpoint::ConnectionPoints,
            QueryParams::new(),
            verbose.unwrap_or(false),
        )
    }

    /// All operators connected to the transmission system.
    ///
    /// * `.country(Country)`: Optional. Only operators registered in this country.
    /// * `.has_data(bool)`: Optional. Only operators that publish data. Defaults to `true`.
    #[builder]
    pub fn operators(
        &self,
        country: Option<Country>,
        has_data: Option<bool>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let mut params = QueryParams::new();
        params.set("hasData", if has_data.unwrap_or(true) { "1" } else { "0" });
        params.set_opt("operatorCountryKey", country.map(|c| c.key));
        self.fetch_listing(Endpoint::Operators, params, verbose.unwrap_or(false))
    }

    /// All balancing zones.
    #[builder]
    pub fn balancing_zones(&self, verbose: Option<bool>) -> Result<DataFrame, EntsogError> {
        self.fetch_listing(
            Endpoint::BalancingZones,
            QueryParams::new(),
            verbose.unwrap_or(false),
        )
    }

    /// Every (operator, point, direction) triple the platform publishes
    /// series for.
    #[builder]
    pub fn operator_point_directions(
        &self,
        country: Option<Country>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let mut params = QueryParams::new();
        params.set_opt("tSOCountry", country.map(|c| c.key));
        self.fetch_listing(
            Endpoint::OperatorPointDirections,
            params,
            verbose.unwrap_or(false),
        )
    }

    /// All interconnections between operators, with continental region keys
    /// derived for both ends.
    #[builder]
    pub fn interconnections(
        &self,
        from_country: Option<Country>,
        to_country: Option<Country>,
        from_balancing_zone: Option<BalancingZone>,
        to_balancing_zone: Option<BalancingZone>,
        from_operator: Option<&str>,
        to_operator: Option<&str>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let mut params = QueryParams::new();
        params.set_opt("fromCountryKey", from_country.map(|c| c.key));
        params.set_opt("toCountryKey", to_country.map(|c| c.key));
        params.set_opt("fromBzKey", from_balancing_zone.map(|z| z.key));
        // sic: the platform spells the receiving side plural
        params.set_opt("toBzKeys", to_balancing_zone.map(|z| z.key));
        params.set_opt("fromOperatorKey", from_operator);
        params.set_opt("toOperatorKey", to_operator);
        let response = self.fetch(Endpoint::Interconnections, &params)?;
        let frame = parse_interconnections(&response.body, &response.url)?;
        project(frame, Endpoint::Interconnections, verbose.unwrap_or(false))
    }

    /// Interconnections aggregated per operator and adjacent system.
    #[builder]
    pub fn aggregate_interconnections(
        &self,
        country: Option<Country>,
        balancing_zone: Option<BalancingZone>,
        operator: Option<&str>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let mut params = QueryParams::new();
        params.set_opt("countryKey", country.map(|c| c.key));
        params.set_opt("bzKey", balancing_zone.map(|z| z.key));
        params.set_opt("operatorKey", operator);
        self.fetch_listing(
            Endpoint::AggregateInterconnections,
            params,
            verbose.unwrap_or(false),
        )
    }

    /// Urgent market messages (unplanned unavailabilities and the like).
    #[builder]
    pub fn urgent_market_messages(
        &self,
        balancing_zone: Option<BalancingZone>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let mut params = QueryParams::new();
        params.set_opt("balancingZoneKey", balancing_zone.map(|z| z.key));
        self.fetch_listing(
            Endpoint::UrgentMarketMessages,
            params,
            verbose.unwrap_or(false),
        )
    }

    /// Transport tariffs per point, operator and product duration.
    ///
    /// The range is split into calendar weeks; weeks without data are
    /// skipped and boundary duplicates are dropped.
    #[builder]
    pub fn tariffs(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        country: Option<Country>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let verbose = verbose.unwrap_or(false);
        chunked(window, ChunkUnit::Week, |block| {
            let mut params = QueryParams::new();
            params.set_window(block);
            params.set_opt("countryKey", country.map(|c| c.key));
            self.fetch_listing(Endpoint::Tariffs, params, verbose)
        })
    }

    /// Simulated cost of flowing 1 GWh/day/year across each point.
    #[builder]
    pub fn tariffs_sim(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        country: Option<Country>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let verbose = verbose.unwrap_or(false);
        chunked(window, ChunkUnit::Week, |block| {
            let mut params = QueryParams::new();
            params.set_window(block);
            params.set_opt("countryKey", country.map(|c| c.key));
            self.fetch_listing(Endpoint::TariffsSim, params, verbose)
        })
    }

    /// Latest nominations, allocations and physical flows, aggregated per
    /// balancing-zone border.
    ///
    /// Rows whose adjacent system lies outside the EU are labelled with the
    /// far country via the memoized interconnections table.
    ///
    /// * `.group_by(GroupBy)`: Optional. Roll values up to point, operator,
    ///   balancing-zone, country or region level.
    /// * `.entry_exit(bool)`: Optional. Net entries against exits into one
    ///   signed series. Defaults to `false`.
    #[builder]
    pub fn aggregated_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        country: Option<Country>,
        balancing_zone: Option<BalancingZone>,
        period_type: Option<PeriodType>,
        group_by: Option<GroupBy>,
        entry_exit: Option<bool>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let entry_exit = entry_exit.unwrap_or(false);
        let verbose = verbose.unwrap_or(false);
        let interconnections = self.cached_interconnections()?;
        chunked(window, ChunkUnit::Week, |block| {
            let mut params = QueryParams::new();
            params.set_window(block);
            params.set_opt("countryKey", country.map(|c| c.key));
            params.set_opt("bzKey", balancing_zone.map(|z| z.key));
            params.set_period_type(period_type.unwrap_or_default());
            let response = self.fetch(Endpoint::AggregatedData, &params)?;
            let frame = parse_aggregated_data(
                &response.body,
                &response.url,
                &interconnections,
                group_by,
                entry_exit,
            )?;
            project(frame, Endpoint::AggregatedData, verbose)
        })
    }

    /// Capacity interruptions, split into calendar days.
    #[builder]
    pub fn interruptions(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let verbose = verbose.unwrap_or(false);
        chunked(window, ChunkUnit::Day, |block| {
            let mut params = QueryParams::new();
            params.set_window(block);
            self.fetch_listing(Endpoint::Interruptions, params, verbose)
        })
    }

    /// Congestion-management auction premiums.
    #[builder]
    pub fn cmp_auction_premiums(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_type: Option<PeriodType>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let mut params = QueryParams::new();
        params.set_window(window);
        params.set_period_type(period_type.unwrap_or_default());
        self.fetch_listing(Endpoint::CmpAuctions, params, verbose.unwrap_or(false))
    }

    /// Congestion-management unavailable firm capacity.
    #[builder]
    pub fn cmp_unavailable_firm_capacity(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_type: Option<PeriodType>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let mut params = QueryParams::new();
        params.set_window(window);
        params.set_period_type(period_type.unwrap_or_default());
        self.fetch_listing(Endpoint::CmpUnavailables, params, verbose.unwrap_or(false))
    }

    /// Congestion-management unsuccessful capacity requests, split into
    /// calendar weeks.
    #[builder]
    pub fn cmp_unsuccessful_requests(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_type: Option<PeriodType>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let verbose = verbose.unwrap_or(false);
        chunked(window, ChunkUnit::Week, |block| {
            let mut params = QueryParams::new();
            params.set_window(block);
            params.set_period_type(period_type.unwrap_or_default());
            self.fetch_listing(Endpoint::CmpUnsuccessfulRequests, params, verbose)
        })
    }

    /// Operational data (flows, nominations, capacities) for the whole
    /// network.
    ///
    /// This is the heaviest endpoint. The range is split into calendar days;
    /// each day is offset-paginated in `page_size` steps, and if a single
    /// request still exceeds the platform's row limit the day is bisected
    /// until it fits or the bisection depth runs out.
    ///
    /// * `.indicators(Vec<Indicator>)`: Optional. Defaults to physical flow only.
    #[builder]
    pub fn operational_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        period_type: Option<PeriodType>,
        indicators: Option<Vec<Indicator>>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let period_type = period_type.unwrap_or_default();
        let indicators = indicators.unwrap_or_else(|| vec![Indicator::PHYSICAL_FLOW]);
        let labels: Vec<&str> = indicators.iter().map(|i| i.label).collect();
        let verbose = verbose.unwrap_or(false);
        chunked(window, ChunkUnit::Day, |block| {
            bisected(block, self.max_bisection_depth, &|half| {
                offset_paginated(self.paging, |page_offset| {
                    let mut params = QueryParams::new();
                    params.set_window(half);
                    params.set_period_type(period_type);
                    params.set_joined("indicator", &labels);
                    params.set_limit(self.paging.page_size as i64);
                    params.set_offset(page_offset);
                    self.fetch_listing(Endpoint::OperationalData, params, verbose)
                })
            })
        })
    }

    /// Operational data restricted to specific point directions, split into
    /// calendar years.
    ///
    /// * `.point_directions(Vec<String>)`: **Required.** Point-direction
    ///   identifiers as listed by [`operator_point_directions`](Self::operator_point_directions).
    #[builder]
    pub fn operational_point_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        point_directions: Vec<String>,
        period_type: Option<PeriodType>,
        indicators: Option<Vec<Indicator>>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let period_type = period_type.unwrap_or_default();
        let labels: Option<Vec<&str>> =
            indicators.as_ref().map(|list| list.iter().map(|i| i.label).collect());
        let verbose = verbose.unwrap_or(false);
        chunked(window, ChunkUnit::Year, |block| {
            let mut params = QueryParams::new();
            params.set_window(block);
            params.set_period_type(period_type);
            params.set_joined("pointDirection", &point_directions);
            if let Some(labels) = &labels {
                params.set_joined("indicator", labels);
            }
            self.fetch_listing(Endpoint::OperationalData, params, verbose)
        })
    }

    /// Operational data fetched operator by operator, each operator's range
    /// split into calendar weeks. Operators without data are skipped.
    ///
    /// * `.operators(Vec<String>)`: Optional. Defaults to every operator key
    ///   found in the memoized operator-point-directions table.
    #[builder]
    pub fn operational_data_by_operators(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        operators: Option<Vec<String>>,
        period_type: Option<PeriodType>,
        indicators: Option<Vec<Indicator>>,
        verbose: Option<bool>,
    ) -> Result<DataFrame, EntsogError> {
        let window = Window::new(start, end)?;
        let period_type = period_type.unwrap_or_default();
        let labels: Option<Vec<&str>> =
            indicators.as_ref().map(|list| list.iter().map(|i| i.label).collect());
        let verbose = verbose.unwrap_or(false);
        let operators = match operators {
            Some(list) => list,
            None => self.known_operator_keys()?,
        };
        per_operator(&operators, |operator| {
            chunked(window, ChunkUnit::Week, |block| {
                let mut params = QueryParams::new();
                params.set_window(block);
                params.set_period_type(period_type);
                params.set("operatorKey", operator);
                if let Some(labels) = &labels {
                    params.set_joined("indicator", labels);
                }
                self.fetch_listing(Endpoint::OperationalData, params, verbose)
            })
        })
    }
}

impl EntsogClient {
    fn fetch(&self, endpoint: Endpoint, params: &QueryParams) -> Result<RawResponse, EntsogError> {
        Ok(self.retry.run(|| self.raw.get(endpoint, params))?)
    }

    fn fetch_listing(
        &self,
        endpoint: Endpoint,
        params: QueryParams,
        verbose: bool,
    ) -> Result<DataFrame, EntsogError> {
        let response = self.fetch(endpoint, &params)?;
        let frame = parse_general(&response.body, &response.url)?;
        project(frame, endpoint, verbose)
    }

    /// The full interconnections table, fetched once per client.
    fn cached_interconnections(&self) -> Result<DataFrame, EntsogError> {
        let mut slot = lock(&self.interconnections);
        if let Some(frame) = slot.as_ref() {
            debug!("interconnections served from the in-memory copy");
            return Ok(frame.clone());
        }
        let response = self.fetch(Endpoint::Interconnections, &QueryParams::new())?;
        let frame = parse_interconnections(&response.body, &response.url)?;
        *slot = Some(frame.clone());
        Ok(frame)
    }

    /// The full operator-point-directions table, fetched once per client.
    fn cached_operator_point_directions(&self) -> Result<DataFrame, EntsogError> {
        let mut slot = lock(&self.operator_point_directions);
        if let Some(frame) = slot.as_ref() {
            debug!("operator point directions served from the in-memory copy");
            return Ok(frame.clone());
        }
        let response = self.fetch(Endpoint::OperatorPointDirections, &QueryParams::new())?;
        let frame = parse_general(&response.body, &response.url)?;
        *slot = Some(frame.clone());
        Ok(frame)
    }

    fn known_operator_keys(&self) -> Result<Vec<String>, EntsogError> {
        let frame = self.cached_operator_point_directions()?;
        let mut keys: Vec<String> = Vec::new();
        for key in frame.column("operator_key")?.str()?.into_iter().flatten() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
