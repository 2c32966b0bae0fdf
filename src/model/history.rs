//! The in-memory transaction history and its two renderings.
use super::Transaction;
use std::{fmt::Display, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("CSV writing error")]
    Csv(#[from] csv::Error),

    #[error("I/O error")]
    Io(#[from] io::Error),
}

const CSV_HEADER: [&str; 10] = [
    "_id",
    "fromCountry",
    "toCountry",
    "fromCurrency",
    "toCurrency",
    "exchangeRate",
    "amount",
    "convertedAmount",
    "date",
    "time",
];

/// Transactions ordered newest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    entries: Vec<Transaction>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a store response, keeping the store's order.
    pub fn replace(&mut self, entries: Vec<Transaction>) {
        self.entries = entries;
    }

    /// Insert a freshly created transaction at the top.
    pub fn prepend(&mut self, tx: Transaction) {
        self.entries.insert(0, tx);
    }

    /// Drop every entry with the given identifier. Returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|tx| tx.id != id);

        before - self.entries.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|tx| tx.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable rendering.
    pub fn table(&self) -> HistoryTable<'_> {
        HistoryTable(self)
    }

    /// Write the history as CSV, header first. An empty history writes only the header.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), HistoryError> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(CSV_HEADER)?;
        for tx in &self.entries {
            csv.write_record([
                tx.id.clone(),
                tx.from_country.clone(),
                tx.to_country.clone(),
                tx.from_currency.clone(),
                tx.to_currency.clone(),
                tx.exchange_rate.to_string(),
                tx.amount.to_string(),
                tx.converted_amount.to_string(),
                tx.date.clone(),
                tx.time.clone(),
            ])?;
        }
        csv.flush()?;

        Ok(())
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct HistoryTable<'a>(&'a History);

impl Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transaction History")?;
        writeln!(f, "=========== =======")?;

        if self.0.is_empty() {
            return writeln!(f, "No transaction history.");
        }

        for tx in self.0 {
            writeln!(f)?;
            writeln!(f, "From Country:     {}", tx.from_country)?;
            writeln!(f, "To Country:       {}", tx.to_country)?;
            writeln!(f, "Amount:           {}", tx.amount)?;
            writeln!(f, "Converted Amount: {}", tx.converted_amount)?;
            writeln!(f, "Date:             {}", tx.date)?;
            writeln!(f, "Time:             {}", tx.time)?;
            writeln!(f, "Id:               {}", tx.id)?;
        }

        Ok(())
    }
}
