use chrono::{DateTime, Utc};
use url::form_urlencoded;

use crate::chunking::Window;

/// Aggregation granularity of time-series endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodType {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl PeriodType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Hour => "hour",
            PeriodType::Day => "day",
            PeriodType::Week => "week",
            PeriodType::Month => "month",
            PeriodType::Year => "year",
        }
    }
}

/// Ordered query parameters for one request, flattened to strings only at the
/// transport boundary.
///
/// Every request carries `limit=-1` (no server-side cap) and `timeZone=UCT`
/// unless a pagination limit is set explicitly.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryParams {
    entries: Vec<(&'static str, String)>,
    limit: Option<i64>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.entries.push((key, value.into()));
        self
    }

    pub fn set_opt(&mut self, key: &'static str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Multi-value parameter, comma-joined. The platform expects literal
    /// commas in the URL, so the encoder leaves them unescaped.
    pub fn set_joined<S: AsRef<str>>(&mut self, key: &'static str, values: &[S]) -> &mut Self {
        let joined = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        self.set(key, joined)
    }

    /// `from`/`to` filters. Time-of-day is dropped; the platform only accepts
    /// calendar dates.
    pub fn set_window(&mut self, window: Window) -> &mut Self {
        self.set("from", format_date(window.start()));
        self.set("to", format_date(window.end()))
    }

    pub fn set_limit(&mut self, limit: i64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn set_offset(&mut self, offset: u64) -> &mut Self {
        self.set("offset", offset.to_string())
    }

    pub fn set_period_type(&mut self, period_type: PeriodType) -> &mut Self {
        self.set("periodType", period_type.as_str())
    }

    /// The encoded query string, base parameters first.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("limit", &self.limit.unwrap_or(-1).to_string());
        serializer.append_pair("timeZone", "UCT");
        for (key, value) in &self.entries {
            serializer.append_pair(key, value);
        }
        // form_urlencoded escapes commas, the platform wants them verbatim
        serializer.finish().replace("%2C", ",")
    }
}

fn format_date(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn base_parameters_come_first() {
        let mut params = QueryParams::new();
        params.set("countryKey", "BE");
        assert_eq!(params.encode(), "limit=-1&timeZone=UCT&countryKey=BE");
    }

    #[test]
    fn explicit_limit_overrides_the_default() {
        let mut params = QueryParams::new();
        params.set_limit(10_000).set_offset(20_000);
        assert_eq!(
            params.encode(),
            "limit=10000&timeZone=UCT&offset=20000"
        );
    }

    #[test]
    fn joined_values_keep_literal_commas() {
        let mut params = QueryParams::new();
        params.set_joined("indicator", &["Physical Flow", "Nominations"]);
        assert_eq!(
            params.encode(),
            "limit=-1&timeZone=UCT&indicator=Physical+Flow,Nominations"
        );
    }

    #[test]
    fn window_serializes_as_calendar_dates() {
        let window = Window::new(
            Utc.with_ymd_and_hms(2021, 1, 1, 6, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 1, 10, 18, 0, 0).unwrap(),
        )
        .unwrap();
        let mut params = QueryParams::new();
        params.set_window(window);
        assert_eq!(
            params.encode(),
            "limit=-1&timeZone=UCT&from=2021-01-01&to=2021-01-10"
        );
    }
}
