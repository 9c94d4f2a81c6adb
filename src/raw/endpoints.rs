/// Descriptor for every endpoint the facade knows how to query: the URL path
/// and the column subset kept when the caller did not ask for verbose output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    ConnectionPoints,
    Operators,
    BalancingZones,
    OperatorPointDirections,
    Interconnections,
    AggregateInterconnections,
    UrgentMarketMessages,
    Tariffs,
    TariffsSim,
    AggregatedData,
    Interruptions,
    CmpAuctions,
    CmpUnavailables,
    CmpUnsuccessfulRequests,
    OperationalData,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ConnectionPoints => "/connectionpoints",
            Endpoint::Operators => "/operators",
            Endpoint::BalancingZones => "/balancingzones",
            Endpoint::OperatorPointDirections => "/operatorpointdirections",
            Endpoint::Interconnections => "/interconnections",
            Endpoint::AggregateInterconnections => "/aggregateInterconnections",
            Endpoint::UrgentMarketMessages => "/urgentmarketmessages",
            Endpoint::Tariffs => "/tariffsfulls",
            Endpoint::TariffsSim => "/tariffsSimulations",
            Endpoint::AggregatedData => "/aggregatedData",
            Endpoint::Interruptions => "/interruptions",
            Endpoint::CmpAuctions => "/cmpauctions",
            Endpoint::CmpUnavailables => "/cmpunavailables",
            Endpoint::CmpUnsuccessfulRequests => "/cmpUnsuccessfulRequests",
            Endpoint::OperationalData => "/operationaldatas",
        }
    }

    /// Column names (already snake_cased) kept in non-verbose results.
    /// Absent columns are skipped rather than erroring; the platform has
    /// been known to drop fields between dataset revisions.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Endpoint::ConnectionPoints => &[
                "point_key",
                "point_label",
                "point_eic_code",
                "point_type",
                "commercial_type",
                "import_from_country_key",
                "has_virtual_point",
                "virtual_point_key",
                "is_cross_border",
                "is_invalid",
            ],
            Endpoint::Operators => &[
                "operator_key",
                "operator_label",
                "operator_country_key",
                "operator_country_label",
                "operator_type_label",
                "tso_eic_code",
            ],
            Endpoint::BalancingZones => &[
                "bz_key",
                "bz_label",
                "bz_label_long",
                "bz_eic_code",
                "bz_manager_key",
                "bz_manager_label",
                "is_deactivated",
            ],
            Endpoint::OperatorPointDirections => &[
                "point_key",
                "point_label",
                "operator_key",
                "operator_label",
                "direction_key",
                "valid_from",
                "valid_to",
                "t_so_country",
                "t_so_balancing_zone",
                "adjacent_country",
                "adjacent_zones",
                "cross_border_point_type",
                "e_u_relationship",
                "point_type",
            ],
            Endpoint::Interconnections => &[
                "point_key",
                "point_label",
                "from_country_key",
                "from_country_label",
                "from_bz_key",
                "from_operator_key",
                "from_operator_label",
                "from_point_key",
                "from_point_label",
                "from_direction_key",
                "to_country_key",
                "to_country_label",
                "to_bz_key",
                "to_operator_key",
                "to_operator_label",
                "to_point_key",
                "to_point_label",
                "to_direction_key",
                "valid_from",
                "valid_to",
                "from_region_key",
                "to_region_key",
            ],
            Endpoint::AggregateInterconnections => &[
                "country_key",
                "country_label",
                "bz_key",
                "bz_label",
                "operator_key",
                "operator_label",
                "direction_key",
                "adjacent_systems_key",
                "adjacent_systems_count",
                "adjacent_systems_label",
            ],
            Endpoint::UrgentMarketMessages => &[
                "message_id",
                "market_participant_name",
                "message_type",
                "publication_date_time",
                "event_status",
                "event_type",
                "event_start",
                "event_stop",
                "unavailability_type",
                "unit_measure",
                "balancing_zone_key",
                "balancing_zone_name",
                "affected_asset_name",
                "direction",
                "unavailable_capacity",
                "available_capacity",
                "technical_capacity",
                "last_update_date_time",
            ],
            Endpoint::Tariffs => &[
                "tariff_period",
                "point_name",
                "point_identifier_eic",
                "direction",
                "operator",
                "operator_key",
                "tso_eic_code",
                "country_code",
                "connection",
                "from_bz",
                "to_bz",
                "start_time_of_validity",
                "end_time_of_validity",
                "capacity_type",
                "unit",
                "product_type_according_to_its_duration",
                "multiplier",
                "discount_for_interruptible_capacity",
                "seasonal_factor",
                "operator_currency",
                "applicable_tariff_per_k_wh_d_local",
                "applicable_tariff_per_k_wh_d_euro",
                "applicable_tariff_in_common_unit",
                "last_update_date",
                "point_key",
            ],
            Endpoint::TariffsSim => &[
                "tariff_period",
                "point_name",
                "point_identifier_eic",
                "direction",
                "operator",
                "operator_key",
                "tso_eic_code",
                "country_code",
                "connection",
                "from_bz",
                "to_bz",
                "capacity_type",
                "unit",
                "product_type_according_to_its_duration",
                "operator_currency",
                "simulation_of_all_the_costs_for_flowing_1_g_wh_day_year_in_eur",
                "last_update_date",
                "point_key",
            ],
            Endpoint::AggregatedData => &[
                "indicator",
                "period_type",
                "period_from",
                "period_to",
                "country_key",
                "country_label",
                "bz_key",
                "operator_key",
                "operator_label",
                "direction_key",
                "adjacent_systems_key",
                "adjacent_systems_label",
                "region_key",
                "adjacent_bz_key",
                "unit",
                "value",
                "points_names",
                "flow_status",
            ],
            Endpoint::Interruptions => &[
                "period_from",
                "period_to",
                "operator_key",
                "operator_label",
                "point_key",
                "point_label",
                "direction_key",
                "interruption_type",
                "capacity_type",
                "unit",
                "value",
                "restoration_information",
                "last_update_date_time",
                "period_type",
                "indicator",
            ],
            Endpoint::CmpAuctions => &[
                "auction_from",
                "auction_to",
                "capacity_from",
                "capacity_to",
                "operator_key",
                "operator_label",
                "point_key",
                "point_label",
                "direction_key",
                "unit",
                "auction_premium",
                "cleared_price",
                "reserve_price",
                "indicator",
                "period_type",
                "period_from",
                "period_to",
                "value",
            ],
            Endpoint::CmpUnavailables => &[
                "period_from",
                "period_to",
                "operator_key",
                "operator_label",
                "point_key",
                "point_label",
                "direction_key",
                "allocation_process",
                "indicator",
                "period_type",
                "unit",
                "value",
            ],
            Endpoint::CmpUnsuccessfulRequests => &[
                "auction_from",
                "auction_to",
                "capacity_from",
                "capacity_to",
                "operator_key",
                "operator_label",
                "point_key",
                "point_label",
                "direction_key",
                "unit",
                "requested_volume",
                "allocated_volume",
                "unallocated_volume",
                "occurence_count",
                "indicator",
                "period_type",
                "period_from",
                "period_to",
            ],
            Endpoint::OperationalData => &[
                "indicator",
                "period_type",
                "period_from",
                "period_to",
                "operator_key",
                "tso_eic_code",
                "operator_label",
                "point_key",
                "point_label",
                "direction_key",
                "unit",
                "value",
                "flow_status",
            ],
        }
    }
}
