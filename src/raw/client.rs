use std::time::Duration;

use log::debug;

use super::classify::classify;
use super::endpoints::Endpoint;
use super::error::RequestError;
use super::params::QueryParams;

const BASE_URL: &str = "https://transparency.entsog.eu/api/v1";

/// The payload of one successful call, with the effective URL kept for
/// provenance.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub body: String,
    pub url: String,
}

/// Thin blocking transport: builds the URL, issues the GET, classifies the
/// outcome. Resilience lives a layer up.
pub(crate) struct RawClient {
    http: reqwest::blocking::Client,
}

impl RawClient {
    pub fn new(timeout: Option<Duration>, proxy: Option<&str>) -> Result<Self, RequestError> {
        let mut builder = reqwest::blocking::Client::builder().timeout(timeout);
        if let Some(proxy) = proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(RequestError::Client)?);
        }
        let http = builder.build().map_err(RequestError::Client)?;
        Ok(Self { http })
    }

    pub fn get(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<RawResponse, RequestError> {
        let url = format!("{BASE_URL}{}?{}", endpoint.path(), params.encode());
        debug!("performing request to {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|source| RequestError::Transport {
                url: url.clone(),
                source,
            })?;
        classify(response)
    }
}
