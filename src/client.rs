use crate::model::{NewTransaction, RatesResponse, Transaction};
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;
use ureq::http::{Response, StatusCode};
use ureq::tls::{TlsConfig, TlsProvider};
use ureq::{Agent, Body};

pub mod rates;
pub mod store;

pub use self::rates::{RatesClient, RatesError};
pub use self::store::{StoreClient, StoreError};

/// The transaction store collaborator.
///
/// Exists as a trait so that unit tests can mock the store responses.
pub trait StoreApi {
    /// Read every stored transaction.
    fn list(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Persist a new transaction, returning the stored object with its identifier.
    fn create(&self, record: &NewTransaction) -> Result<Transaction, StoreError>;

    /// Delete a transaction by identifier.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// The exchange rate collaborator.
///
/// Exists as a trait so that unit tests can mock the rate responses.
pub trait RatesApi {
    /// Latest rates quoted against `base`.
    fn latest(&self, base: &str) -> Result<RatesResponse, RatesError>;
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Worker pool size must be at least 1")]
    Size,

    #[error("Rayon thread pool error")]
    RayonThreadPoolInit(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transaction store error")]
    Store(#[from] StoreError),

    #[error("Exchange rate service error")]
    Rates(#[from] RatesError),
}

/// A non-success response, as status code and reason phrase.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpStatus {
    pub code: u16,
    pub reason: &'static str,
}

impl std::fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}

impl From<StatusCode> for HttpStatus {
    fn from(status: StatusCode) -> Self {
        Self {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown"),
        }
    }
}

/// HTTP agent shared by both clients.
///
/// Status codes are returned rather than raised, the clients decide what counts as failure.
pub(crate) fn new_agent(num_threads: usize) -> Agent {
    Agent::from(
        Agent::config_builder()
            .http_status_as_error(false)
            .max_idle_connections_per_host(num_threads)
            .tls_config(
                TlsConfig::builder()
                    .provider(TlsProvider::NativeTls)
                    .build(),
            )
            .build(),
    )
}

/// `Ok` for 2xx responses, otherwise the status.
pub(crate) fn check_status(resp: &Response<Body>) -> Result<(), HttpStatus> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(status.into())
    }
}

pub(crate) fn create_thread_pool(num_threads: usize) -> Result<ThreadPool, PoolError> {
    if num_threads == 0 {
        return Err(PoolError::Size);
    }

    Ok(ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|index| format!("fxconvert-{index}"))
        .build()?)
}

/// Percent-encode one URL path segment (RFC 3986 unreserved characters pass through).
pub(crate) fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    encoded
}
