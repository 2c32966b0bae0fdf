//! View state of the conversion form, and the pure transitions applied to it.
//!
//! Nothing here performs I/O. The [`Converter`] dispatches requests and feeds their responses
//! back through these methods.
//!
//! [`Converter`]: crate::converter::Converter
use crate::model::{
    converted_amount, parse_amount, Country, History, NewTransaction, RatesResponse, Transaction,
};
use std::fmt::Display;

/// Every field the form shows, plus the transaction history below it.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub from_country: String,
    pub to_country: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub exchange_rate: f64,
    pub history: History,
}

/// The inputs a rate refresh captures when it is dispatched.
///
/// The response is applied against these, not against whatever the form holds by then.
///
/// Two requests are equal when a refresh for one would fetch the same thing as the other.
/// Amounts compare by identity: NaN equals NaN, and `0.0` differs from `-0.0`.
#[derive(Clone, Debug)]
pub struct RateRequest {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
}

impl PartialEq for RateRequest {
    fn eq(&self, other: &Self) -> bool {
        let same_amount = self.amount.to_bits() == other.amount.to_bits()
            || (self.amount.is_nan() && other.amount.is_nan());

        same_amount
            && self.from_currency == other.from_currency
            && self.to_currency == other.to_currency
    }
}

impl Default for FormState {
    fn default() -> Self {
        // The destination country and currency start out of step until the first selection.
        Self {
            from_country: "USD".to_string(),
            to_country: "CAD".to_string(),
            from_currency: "USD".to_string(),
            to_currency: "INR".to_string(),
            amount: 0.0,
            converted_amount: 0.0,
            exchange_rate: 1.0,
            history: History::new(),
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_from_country(&mut self, country: Country) {
        self.from_country = country.code.to_string();
        self.from_currency = country.code.to_string();
    }

    pub fn select_to_country(&mut self, country: Country) {
        self.to_country = country.code.to_string();
        self.to_currency = country.code.to_string();
    }

    /// Store a raw amount edit and recompute the converted amount with the current rate.
    pub fn edit_amount(&mut self, input: &str) {
        self.amount = parse_amount(input);
        self.converted_amount = converted_amount(self.amount, self.exchange_rate);
    }

    pub fn rate_request(&self) -> RateRequest {
        RateRequest {
            from_currency: self.from_currency.clone(),
            to_currency: self.to_currency.clone(),
            amount: self.amount,
        }
    }

    /// Apply a rate response to the form. Returns `false` and leaves the rate and converted
    /// amount untouched when the response has no usable quote for the requested destination.
    ///
    /// A quote of zero is not usable.
    pub fn apply_rates(&mut self, request: &RateRequest, rates: &RatesResponse) -> bool {
        match rates
            .rate(&request.to_currency)
            .filter(|rate| *rate != 0.0)
        {
            Some(rate) => {
                self.exchange_rate = rate;
                self.converted_amount = converted_amount(request.amount, rate);
                true
            }
            None => false,
        }
    }

    /// Snapshot the form into a record for submission.
    pub fn new_transaction(&self, date: String, time: String) -> NewTransaction {
        NewTransaction {
            from_country: self.from_country.clone(),
            to_country: self.to_country.clone(),
            from_currency: self.from_currency.clone(),
            to_currency: self.to_currency.clone(),
            exchange_rate: self.exchange_rate,
            amount: self.amount,
            converted_amount: self.converted_amount,
            date,
            time,
        }
    }

    pub fn apply_history(&mut self, history: Vec<Transaction>) {
        self.history.replace(history);
    }

    pub fn apply_created(&mut self, tx: Transaction) {
        self.history.prepend(tx);
    }

    pub fn apply_deleted(&mut self, id: &str) -> usize {
        self.history.remove(id)
    }
}

impl Display for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "From Country:     {}", self.from_country)?;
        writeln!(f, "To Country:       {}", self.to_country)?;
        writeln!(f, "From Currency:    {}", self.from_currency)?;
        writeln!(f, "To Currency:      {}", self.to_currency)?;
        writeln!(f, "Exchange Rate:    {}", self.exchange_rate)?;
        writeln!(f, "Amount:           {}", self.amount)?;
        writeln!(f, "Converted Amount: {}", self.converted_amount)
    }
}
