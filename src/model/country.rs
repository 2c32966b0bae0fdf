use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountryError {
    #[error("Unknown country `{0}`. Try one of: USA, Canada, UK, India, Sri Lanka")]
    Unknown(String),
}

/// A selectable country. Its `code` doubles as the form value and the currency code.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Country {
    pub name: &'static str,
    pub code: &'static str,
}

pub const COUNTRIES: [Country; 5] = [
    Country::new("USA", "USD"),
    Country::new("Canada", "CAD"),
    Country::new("UK", "GBP"),
    Country::new("India", "INR"),
    Country::new("Sri Lanka", "LKR"),
];

impl Country {
    const fn new(name: &'static str, code: &'static str) -> Self {
        Self { name, code }
    }

    /// Find a country by currency code or display name, ignoring ASCII case.
    pub fn lookup(value: &str) -> Option<Self> {
        let value = value.trim();

        COUNTRIES.iter().copied().find(|country| {
            country.code.eq_ignore_ascii_case(value) || country.name.eq_ignore_ascii_case(value)
        })
    }
}

impl FromStr for Country {
    type Err = CountryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| CountryError::Unknown(s.to_string()))
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.name, self.code)
    }
}
