use super::{check_status, encode_path_segment, new_agent, HttpStatus, StoreApi};
use crate::model::{constants::STORE_COLLECTION_PATH, NewTransaction, Transaction};
use std::time::Instant;
use thiserror::Error;
use tracing::{info, trace};
use ureq::Agent;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error")]
    Http(#[from] ureq::Error),

    #[error("Store responded with `{0}`")]
    Status(HttpStatus),

    #[error("JSON decoding error")]
    Json(#[from] serde_json::Error),
}

impl From<HttpStatus> for StoreError {
    fn from(value: HttpStatus) -> Self {
        Self::Status(value)
    }
}

/// Blocking client for the transaction store's collection endpoint.
#[derive(Clone, Debug)]
pub struct StoreClient {
    agent: Agent,
    collection: String,
}

impl StoreClient {
    /// Create a store client for the given base URL.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use fxconvert::client::{StoreApi, StoreClient};
    /// let store = StoreClient::new("https://currency-converter-backend-vercel-fix.vercel.app", 4);
    /// let history = store.list();
    /// ```
    pub fn new(base_url: &str, num_threads: usize) -> Self {
        Self {
            agent: new_agent(num_threads),
            collection: format!("{}{STORE_COLLECTION_PATH}", base_url.trim_end_matches('/')),
        }
    }

    /// Full URL of the collection endpoint.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl StoreApi for StoreClient {
    fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        info!("Fetching transaction history from `{}`", self.collection);

        let start = Instant::now();
        let mut resp = self.agent.get(&self.collection).call()?;
        check_status(&resp)?;
        let body = resp.body_mut().read_to_string()?;
        let dur = start.elapsed();
        trace!("{body}");

        let history: Vec<Transaction> = serde_json::from_str(&body)?;
        info!("{} transactions received in {dur:?}", history.len());

        Ok(history)
    }

    fn create(&self, record: &NewTransaction) -> Result<Transaction, StoreError> {
        info!(
            "Creating transaction {} {} -> {}",
            record.amount, record.from_currency, record.to_currency
        );
        trace!("{record:#?}");

        let start = Instant::now();
        let mut resp = self.agent.post(&self.collection).send_json(record)?;
        check_status(&resp)?;
        let body = resp.body_mut().read_to_string()?;
        let dur = start.elapsed();
        trace!("{body}");

        let tx: Transaction = serde_json::from_str(&body)?;
        info!("Transaction `{}` created in {dur:?}", tx.id);

        Ok(tx)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.collection, encode_path_segment(id));
        info!("Deleting transaction `{id}`");

        let start = Instant::now();
        let resp = self.agent.delete(&url).call()?;
        check_status(&resp)?;
        let dur = start.elapsed();

        info!("Transaction `{id}` deleted in {dur:?}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let store = StoreClient::new("https://example.com/", 1);
        assert_eq!(store.collection(), "https://example.com/api/workouts");

        let store = StoreClient::new("http://localhost:4000", 1);
        assert_eq!(store.collection(), "http://localhost:4000/api/workouts");
    }

    #[test]
    fn test_status_error_message() {
        let err = StoreError::from(HttpStatus {
            code: 500,
            reason: "Internal Server Error",
        });
        assert_eq!(
            err.to_string(),
            "Store responded with `500 Internal Server Error`"
        );
    }
}
