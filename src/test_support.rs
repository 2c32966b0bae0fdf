//! Fixtures and mock collaborators shared by unit tests.
use crate::client::{HttpStatus, RatesApi, RatesError, StoreApi, StoreError};
use crate::model::{NewTransaction, RatesResponse, Transaction};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use ureq::http::StatusCode;

pub(crate) fn sample_record() -> NewTransaction {
    NewTransaction {
        from_country: "USD".to_string(),
        to_country: "INR".to_string(),
        from_currency: "USD".to_string(),
        to_currency: "INR".to_string(),
        exchange_rate: 83.5,
        amount: 10.0,
        converted_amount: 835.0,
        date: "10/17/2026".to_string(),
        time: "3:04:05 PM".to_string(),
    }
}

pub(crate) fn sample_tx(id: &str) -> Transaction {
    Transaction::new(id, sample_record())
}

pub(crate) fn rates_for(base: &str, rates: &[(&str, f64)]) -> RatesResponse {
    RatesResponse {
        result: Some("success".to_string()),
        base_code: Some(base.to_string()),
        rates: rates
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect(),
        ..Default::default()
    }
}

fn status(code: u16) -> HttpStatus {
    HttpStatus::from(StatusCode::from_u16(code).unwrap())
}

/// In-memory transaction store. Set `failure` to answer every request with that status.
#[derive(Default)]
pub(crate) struct MockStore {
    pub(crate) stored: Mutex<Vec<Transaction>>,
    pub(crate) failure: Mutex<Option<u16>>,
    pub(crate) created: Mutex<Vec<NewTransaction>>,
    next_id: AtomicUsize,
}

impl MockStore {
    pub(crate) fn with(stored: Vec<Transaction>) -> Self {
        Self {
            stored: Mutex::new(stored),
            ..Default::default()
        }
    }

    pub(crate) fn failing(code: u16) -> Self {
        Self {
            failure: Mutex::new(Some(code)),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        match *self.failure.lock() {
            Some(code) => Err(StoreError::Status(status(code))),
            None => Ok(()),
        }
    }
}

impl StoreApi for MockStore {
    fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        self.check()?;

        Ok(self.stored.lock().clone())
    }

    fn create(&self, record: &NewTransaction) -> Result<Transaction, StoreError> {
        self.created.lock().push(record.clone());
        self.check()?;

        let id = format!("tx{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let tx = Transaction::new(id, record.clone());
        self.stored.lock().insert(0, tx.clone());

        Ok(tx)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check()?;

        let mut stored = self.stored.lock();
        let before = stored.len();
        stored.retain(|tx| tx.id != id);
        if stored.len() == before {
            return Err(StoreError::Status(status(404)));
        }

        Ok(())
    }
}

/// Rate service answering from a fixed table, keyed by base currency.
#[derive(Default)]
pub(crate) struct MockRates {
    pub(crate) table: HashMap<String, RatesResponse>,
    pub(crate) calls: AtomicUsize,
}

impl MockRates {
    pub(crate) fn with(base: &str, rates: &[(&str, f64)]) -> Self {
        let mut table = HashMap::new();
        table.insert(base.to_string(), rates_for(base, rates));

        Self {
            table,
            calls: AtomicUsize::new(0),
        }
    }
}

impl RatesApi for MockRates {
    fn latest(&self, base: &str) -> Result<RatesResponse, RatesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.table
            .get(base)
            .cloned()
            .ok_or_else(|| RatesError::Api("unsupported-code".to_string()))
    }
}

/// Rate service whose responses are held back until the test releases them.
///
/// Responses are keyed by base currency and each blocks until its gate is opened, so tests
/// decide the order in which concurrent requests complete.
#[derive(Default)]
pub(crate) struct GatedRates {
    pending: Mutex<HashMap<String, (RatesResponse, Receiver<()>)>>,
}

impl GatedRates {
    /// Queue the response for `base` and return the sender that releases it.
    pub(crate) fn push(&self, base: &str, rates: &[(&str, f64)]) -> Sender<()> {
        let (gate, wait) = mpsc::channel();
        self.pending
            .lock()
            .insert(base.to_string(), (rates_for(base, rates), wait));

        gate
    }
}

impl RatesApi for GatedRates {
    fn latest(&self, base: &str) -> Result<RatesResponse, RatesError> {
        let (response, wait) = self
            .pending
            .lock()
            .remove(base)
            .expect("no queued rate response");
        wait.recv().expect("gate dropped");

        Ok(response)
    }
}
