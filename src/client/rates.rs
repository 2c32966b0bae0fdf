use super::{check_status, encode_path_segment, new_agent, HttpStatus, RatesApi};
use crate::model::{constants::RATES_LATEST_PATH, RatesResponse};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, trace};
use ureq::Agent;

#[derive(Debug, Error)]
pub enum RatesError {
    #[error("HTTP error")]
    Http(#[from] ureq::Error),

    #[error("Rate service responded with `{0}`")]
    Status(HttpStatus),

    #[error("JSON decoding error")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),
}

impl From<HttpStatus> for RatesError {
    fn from(value: HttpStatus) -> Self {
        Self::Status(value)
    }
}

/// Blocking client for the latest-rates endpoint.
#[derive(Clone, Debug)]
pub struct RatesClient {
    agent: Agent,
    base_url: String,
}

impl RatesClient {
    /// Create a rates client for the given base URL.
    pub fn new(base_url: &str, num_threads: usize) -> Self {
        Self {
            agent: new_agent(num_threads),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the latest rates quoted against `base`.
    pub fn latest_url(&self, base: &str) -> String {
        format!(
            "{}{RATES_LATEST_PATH}/{}",
            self.base_url,
            encode_path_segment(base)
        )
    }
}

impl RatesApi for RatesClient {
    fn latest(&self, base: &str) -> Result<RatesResponse, RatesError> {
        let url = self.latest_url(base);
        info!("Fetching `{base}` rates");

        let start = Instant::now();
        let mut resp = self.agent.get(&url).call()?;
        check_status(&resp)?;
        let body = resp.body_mut().read_to_string()?;
        let dur = start.elapsed();
        trace!("{body}");

        let rates: RatesResponse = serde_json::from_str(&body)?;
        if rates.is_error() {
            let reason = rates.error_type.unwrap_or_else(|| "unknown".to_string());
            return Err(RatesError::Api(reason));
        }
        info!("`{base}` rates received in {dur:?}");

        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_url() {
        let rates = RatesClient::new("https://open.er-api.com/", 1);
        assert_eq!(rates.latest_url("USD"), "https://open.er-api.com/v6/latest/USD");
    }
}
