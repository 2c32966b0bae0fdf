#![forbid(unsafe_code)]

pub mod client;
pub mod command;
pub mod config;
pub mod converter;
pub mod errors;
pub mod form;
pub mod model;

#[cfg(test)]
pub(crate) mod test_support;
