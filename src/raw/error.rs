use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong with a single request to the platform.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The platform holds no rows for the requested filters.
    #[error("no matching data found")]
    NoMatchingData,

    /// The requested range holds more rows than a single response may carry.
    #[error("requested data exceeds the allowed limit ({requested} requested, {allowed} allowed)")]
    PaginationLimit { requested: u64, allowed: u64 },

    /// A business parameter was rejected by the platform.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested indicator or period type is not valid for the endpoint.
    #[error("invalid type for this query: {0}")]
    InvalidType(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited by the platform")]
    RateLimited,

    #[error("bad gateway")]
    BadGateway,

    #[error("gateway timeout")]
    GatewayTimeout,

    /// The HTTP client itself could not be constructed.
    #[error("failed to construct the HTTP client")]
    Client(#[source] reqwest::Error),

    /// The request never produced a usable response.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// An error status with no recognizable platform message.
    #[error("unexpected status {status} for {url}")]
    Status {
        url: String,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    /// Whether retrying the identical request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RequestError::RateLimited
                | RequestError::BadGateway
                | RequestError::GatewayTimeout
                | RequestError::Transport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_infrastructure_failures_are_transient() {
        assert!(RequestError::RateLimited.is_transient());
        assert!(RequestError::BadGateway.is_transient());
        assert!(RequestError::GatewayTimeout.is_transient());
        assert!(!RequestError::NoMatchingData.is_transient());
        assert!(!RequestError::Unauthorized.is_transient());
        assert!(!RequestError::PaginationLimit {
            requested: 500,
            allowed: 250
        }
        .is_transient());
    }
}
