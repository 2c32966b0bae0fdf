use crate::model::constants::{
    DEFAULT_DATE_FORMAT, DEFAULT_RATES_URL, DEFAULT_STORE_URL, DEFAULT_TIME_FORMAT,
};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::{env, fmt::Display};
use thiserror::Error;

/// Worker pool size when `RAYON_NUM_THREADS` is not set.
pub const DEFAULT_THREADPOOL_SIZE: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error parsing RAYON_NUM_THREADS")]
    ThreadPoolSize(#[source] std::num::ParseIntError),

    #[error("Invalid date format `{0}`")]
    DateFormat(String),

    #[error("Invalid time format `{0}`")]
    TimeFormat(String),
}

/// Runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub store_url: String,
    pub rates_url: String,
    pub num_threads: usize,
    pub locale: LocaleFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            rates_url: DEFAULT_RATES_URL.to_string(),
            num_threads: DEFAULT_THREADPOOL_SIZE,
            locale: LocaleFormat::default(),
        }
    }
}

impl Config {
    /// Read `CONVERTER_STORE_URL`, `CONVERTER_RATES_URL` and `RAYON_NUM_THREADS`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_url =
            env::var("CONVERTER_STORE_URL").unwrap_or_else(|_| DEFAULT_STORE_URL.to_string());
        let rates_url =
            env::var("CONVERTER_RATES_URL").unwrap_or_else(|_| DEFAULT_RATES_URL.to_string());
        let num_threads = env::var("RAYON_NUM_THREADS")
            .map(|threads| threads.parse().map_err(ConfigError::ThreadPoolSize))
            .unwrap_or(Ok(DEFAULT_THREADPOOL_SIZE))?;

        Ok(Self {
            store_url,
            rates_url,
            num_threads,
            locale: LocaleFormat::default(),
        })
    }
}

/// strftime patterns used to stamp submissions with a local date and time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocaleFormat {
    date: String,
    time: String,
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self {
            date: DEFAULT_DATE_FORMAT.to_string(),
            time: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl LocaleFormat {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Result<Self, ConfigError> {
        let date = date.into();
        let time = time.into();

        if !is_valid_pattern(&date) {
            return Err(ConfigError::DateFormat(date));
        }
        if !is_valid_pattern(&time) {
            return Err(ConfigError::TimeFormat(time));
        }

        Ok(Self { date, time })
    }

    /// Format `now` as a `(date, time)` pair.
    pub fn stamp<Tz>(&self, now: &DateTime<Tz>) -> (String, String)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        (
            now.format(&self.date).to_string(),
            now.format(&self.time).to_string(),
        )
    }
}

// Formatting an invalid pattern panics in `to_string()`, so reject them up front.
fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}
