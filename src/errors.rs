//! All public error types, collected in one place for binaries.

pub use crate::client::rates::RatesError;
pub use crate::client::store::StoreError;
pub use crate::client::{ClientError, PoolError};
pub use crate::command::CommandError;
pub use crate::config::ConfigError;
pub use crate::model::country::CountryError;
pub use crate::model::history::HistoryError;
