#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use fxconvert::client::{RatesApi as _, RatesClient};
use fxconvert::config::Config;
use fxconvert::model::{converted_amount, parse_amount};
use onlyargs::{CliError, OnlyArgs as _};
use onlyargs_derive::OnlyArgs;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum Error {
    #[error("CLI error")]
    Cli(#[from] CliError),

    #[error("Configuration error")]
    Config(#[from] fxconvert::errors::ConfigError),

    #[error("Exchange rate service error")]
    Rates(#[from] fxconvert::errors::RatesError),

    #[error("No `{1}` rate quoted against `{0}`")]
    MissingRate(String, String),
}

/// Query the exchange rate service for a single currency pair.
///
/// Uses CONVERTER_RATES_URL when set.
#[derive(Debug, OnlyArgs)]
struct Args {
    /// Base currency code.
    #[default("USD")]
    from: String,

    /// Quote currency code.
    to: String,

    /// Amount of the base currency to convert.
    #[default("1")]
    amount: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            if matches!(err, Error::Cli(_)) {
                eprintln!("{}", Args::HELP);
            }

            eprintln!("Error: {err}");
            for source in err.sources().skip(1) {
                eprintln!("  Caused by: {source}");
            }

            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let args: Args = onlyargs::parse()?;

    let config = Config::from_env()?;
    let from = args.from.to_ascii_uppercase();
    let to = args.to.to_ascii_uppercase();

    let rates = RatesClient::new(&config.rates_url, 1).latest(&from)?;
    let rate = rates
        .rate(&to)
        .ok_or_else(|| Error::MissingRate(from.clone(), to.clone()))?;
    let amount = parse_amount(&args.amount);

    println!("base:\t{from}");
    println!("quote:\t{to}");
    println!("rate:\t{rate}");
    println!("amount:\t{amount}");
    println!("converted:\t{}", converted_amount(amount, rate));
    if let Some(updated) = rates.time_last_update_utc {
        println!("updated:\t{updated}");
    }

    Ok(())
}
