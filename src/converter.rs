//! Dispatches form operations onto a worker pool and applies their responses as they arrive.
//!
//! Every operation that talks to a remote service returns immediately. Its response is applied
//! to the shared [`FormState`] by whichever worker completes it, in completion order. A rate
//! request that was sent first but answered last therefore wins, exactly like overlapping
//! callbacks would.
//!
//! Failures are logged and otherwise dropped: the form keeps whatever it showed before.
use crate::client::{create_thread_pool, ClientError, PoolError, RatesApi, StoreApi};
use crate::config::LocaleFormat;
use crate::form::FormState;
use crate::model::Country;
use chrono::Local;
use error_iter::ErrorIter as _;
use parking_lot::{Condvar, Mutex};
use rayon::ThreadPool;
use std::sync::Arc;
use tracing::{debug, error, info, Span};

/// Counts dispatched requests that have not been applied yet.
#[derive(Default)]
struct InFlight {
    count: Mutex<usize>,
    idle: Condvar,
}

impl InFlight {
    fn begin(&self) {
        *self.count.lock() += 1;
    }

    fn end(&self) {
        let mut count = self.count.lock();
        *count -= 1;
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.idle.wait(&mut count);
        }
    }
}

/// The conversion form, wired to its two remote collaborators.
pub struct Converter<S, R> {
    store: Arc<S>,
    rates: Arc<R>,
    state: Arc<Mutex<FormState>>,
    in_flight: Arc<InFlight>,
    pool: ThreadPool,
    locale: LocaleFormat,
}

impl<S, R> Converter<S, R>
where
    S: StoreApi + Send + Sync + 'static,
    R: RatesApi + Send + Sync + 'static,
{
    /// Create a converter with an initial form and `num_threads` workers.
    pub fn new(
        store: S,
        rates: R,
        num_threads: usize,
        locale: LocaleFormat,
    ) -> Result<Self, PoolError> {
        Ok(Self {
            store: Arc::new(store),
            rates: Arc::new(rates),
            state: Arc::new(Mutex::new(FormState::new())),
            in_flight: Arc::new(InFlight::default()),
            pool: create_thread_pool(num_threads)?,
            locale,
        })
    }

    /// Load the history and fetch the initial rate, as a freshly opened form does.
    pub fn start(&self) {
        self.load_history();
        self.refresh_rate();
    }

    /// Replace the history with the store's contents.
    pub fn load_history(&self) {
        let store = Arc::clone(&self.store);

        self.dispatch(move |state| match store.list() {
            Ok(history) => state.lock().apply_history(history),
            Err(err) => log_failure("Error fetching transaction history", err.into()),
        });
    }

    /// Fetch the rate for the current currencies and amount.
    pub fn refresh_rate(&self) {
        let request = self.state.lock().rate_request();
        let rates = Arc::clone(&self.rates);

        self.dispatch(move |state| match rates.latest(&request.from_currency) {
            Ok(response) => {
                if !state.lock().apply_rates(&request, &response) {
                    debug!(
                        "No `{}` rate quoted against `{}`; keeping previous rate",
                        request.to_currency, request.from_currency,
                    );
                }
            }
            Err(err) => log_failure("Error fetching exchange rate", err.into()),
        });
    }

    /// Amount edit. Updates the converted amount immediately, then refreshes the rate if the
    /// amount changed.
    pub fn set_amount(&self, input: &str) {
        self.edit(|form| form.edit_amount(input));
    }

    pub fn select_from_country(&self, country: Country) {
        self.edit(|form| form.select_from_country(country));
    }

    pub fn select_to_country(&self, country: Country) {
        self.edit(|form| form.select_to_country(country));
    }

    /// Send the current form to the store and put the stored transaction on top of the history.
    pub fn submit(&self) {
        let (date, time) = self.locale.stamp(&Local::now());
        let record = self.state.lock().new_transaction(date, time);
        let store = Arc::clone(&self.store);

        self.dispatch(move |state| match store.create(&record) {
            Ok(tx) => {
                info!("Transaction `{}` created successfully", tx.id);
                state.lock().apply_created(tx);
            }
            Err(err) => log_failure("Error creating transaction", err.into()),
        });
    }

    /// Delete a transaction from the store, then from the history.
    pub fn delete(&self, id: &str) {
        let id = id.to_string();
        let store = Arc::clone(&self.store);

        self.dispatch(move |state| match store.delete(&id) {
            Ok(()) => {
                let removed = state.lock().apply_deleted(&id);
                info!("Transaction `{id}` deleted ({removed} removed from history)");
            }
            Err(err) => log_failure(&format!("Error deleting transaction `{id}`"), err.into()),
        });
    }

    /// A copy of the form as it is right now.
    pub fn snapshot(&self) -> FormState {
        self.state.lock().clone()
    }

    /// Number of dispatched requests not applied yet.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.count.lock()
    }

    /// Block until every dispatched request has been applied.
    pub fn settle(&self) {
        self.in_flight.wait();
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn rates(&self) -> &R {
        &self.rates
    }

    /// Apply an edit, and refresh the rate only when the edit changed what a refresh fetches.
    fn edit<F>(&self, edit: F)
    where
        F: FnOnce(&mut FormState),
    {
        let changed = {
            let mut state = self.state.lock();
            let before = state.rate_request();
            edit(&mut state);
            state.rate_request() != before
        };

        if changed {
            self.refresh_rate();
        }
    }

    fn dispatch<F>(&self, task: F)
    where
        F: FnOnce(&Mutex<FormState>) + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let in_flight = Arc::clone(&self.in_flight);
        // Responses are logged under the span that dispatched the request.
        let span = Span::current();

        in_flight.begin();
        self.pool.spawn(move || {
            span.in_scope(|| task(&state));
            in_flight.end();
        });
    }
}

fn log_failure(context: &str, err: ClientError) {
    let chain = err
        .sources()
        .map(|source| source.to_string())
        .collect::<Vec<_>>()
        .join(": ");

    error!("{context}: {chain}");
}
