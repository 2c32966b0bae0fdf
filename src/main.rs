//  [rgrant 20261017 09:00 UTC] fxconvert

#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use fxconvert::client::{RatesApi, RatesClient, StoreApi, StoreClient};
use fxconvert::command::{Command, HELP};
use fxconvert::config::{Config, LocaleFormat};
use fxconvert::converter::Converter;
use fxconvert::model::COUNTRIES;
use is_terminal::IsTerminal as _;
use onlyargs::{CliError, OnlyArgs as _};
use onlyargs_derive::OnlyArgs;
use std::fs::File;
use std::io::{self, BufRead as _, BufWriter, Write as _};
use std::{env, path::PathBuf, process::ExitCode};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

/// Convert between currencies at live rates and keep a history of conversions.
///
/// Reads commands from stdin, one per line. Type `help` for the list.
#[derive(Debug, OnlyArgs)]
#[footer = "Environment variables:"]
#[footer = "  - CONVERTER_STORE_URL accepts a http: or https: URL"]
#[footer = "      default is \"https://currency-converter-backend-vercel-fix.vercel.app\""]
#[footer = "  - CONVERTER_RATES_URL accepts a http: or https: URL"]
#[footer = "      default is \"https://open.er-api.com\""]
#[footer = "  - RAYON_NUM_THREADS sets how many requests may be in flight at once"]
#[footer = "      default is 4"]
#[footer = "  - RUST_LOG sets the log filter, e.g. `RUST_LOG=debug`"]
#[footer = "  - TERM_COLOR accepts \"always\" to override automatic terminal sensing"]
struct Args {
    /// Print the transaction history as CSV instead of a table.
    csv: bool,

    /// Also write the transaction history as CSV to this file on exit.
    #[short('o')]
    output: Option<PathBuf>,

    /// Do not wait for requests to complete between commands.
    no_wait: bool,

    /// strftime pattern for submission dates.
    #[default("%-m/%-d/%Y")]
    date_format: String,

    /// strftime pattern for submission times.
    #[default("%-I:%M:%S %p")]
    time_format: String,
}

#[derive(Debug, Error)]
enum Error {
    #[error("Argument parsing error")]
    Cli(#[from] CliError),

    #[error("Configuration error")]
    Config(#[from] fxconvert::errors::ConfigError),

    #[error("Worker pool error")]
    Pool(#[from] fxconvert::errors::PoolError),

    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Unable to write history")]
    History(#[from] fxconvert::errors::HistoryError),

    #[error("Unable to write history to {0:?}")]
    Output(PathBuf, #[source] fxconvert::errors::HistoryError),
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with rendered output on stdout.
    // Uses the `RUST_LOG` environment var for configuration. E.g. `RUST_LOG=debug cargo run`
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let term_color = env::var("TERM_COLOR")
        .map(|color| color == "always")
        .unwrap_or_else(|_| io::stderr().is_terminal());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(term_color),
        )
        .with(env_filter)
        .init();

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

    let mut config = Config::from_env()?;
    config.locale = LocaleFormat::new(args.date_format, args.time_format)?;
    debug!(
        "Store: `{}`, rates: `{}`, workers: {}",
        config.store_url, config.rates_url, config.num_threads
    );

    let store = StoreClient::new(&config.store_url, config.num_threads);
    let rates = RatesClient::new(&config.rates_url, config.num_threads);
    let converter = Converter::new(store, rates, config.num_threads, config.locale)?;

    converter.start();
    converter.settle();

    println!("Currency Conversion Form");
    println!("======== ========== ====");
    println!();
    print!("{}", converter.snapshot());
    println!();
    print_history(&converter, args.csv)?;

    let interactive = io::stdin().is_terminal();
    let mut lines = io::stdin().lock().lines();
    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let command = match Command::parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("❌ {err}");
                for source in err.sources().skip(1) {
                    eprintln!("  Caused by: {source}");
                }
                continue;
            }
        };

        if !execute(&converter, command, args.csv)? {
            break;
        }
        if !args.no_wait {
            converter.settle();
        }
    }

    converter.settle();

    if let Some(path) = args.output {
        let file = BufWriter::new(File::create(&path)?);
        converter
            .snapshot()
            .history
            .write_csv(file)
            .map_err(|err| Error::Output(path.clone(), err))?;
        println!("Transaction history written to {}", path.display());
    }

    Ok(())
}

/// Run one command. Returns `false` when the session should end.
fn execute<S, R>(converter: &Converter<S, R>, command: Command, csv: bool) -> Result<bool, Error>
where
    S: StoreApi + Send + Sync + 'static,
    R: RatesApi + Send + Sync + 'static,
{
    match command {
        Command::From(country) => converter.select_from_country(country),
        Command::To(country) => converter.select_to_country(country),
        Command::Amount(input) => converter.set_amount(&input),
        Command::Refresh => converter.refresh_rate(),
        Command::Submit => converter.submit(),
        Command::Delete(id) => converter.delete(&id),
        Command::Show => print!("{}", converter.snapshot()),
        Command::History => print_history(converter, csv)?,
        Command::Countries => {
            for country in COUNTRIES {
                println!("{country}");
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }

    Ok(true)
}

fn print_history<S, R>(converter: &Converter<S, R>, csv: bool) -> Result<(), Error>
where
    S: StoreApi + Send + Sync + 'static,
    R: RatesApi + Send + Sync + 'static,
{
    let history = converter.snapshot().history;

    if csv {
        history.write_csv(io::stdout().lock())?;
    } else {
        print!("{}", history.table());
    }

    Ok(())
}

