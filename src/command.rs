//! Line commands understood by the interactive session.
use crate::model::{Country, CountryError};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  from <country>    Select the source country (name or currency code)
  to <country>      Select the destination country
  amount [text]     Enter an amount; anything non-numeric becomes NaN
  refresh           Fetch the exchange rate again
  submit            Save the current conversion
  delete <id>       Delete a saved conversion
  show              Print the form
  history           Print the transaction history
  countries         List selectable countries
  help              Print this message
  quit              Exit";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`. Type `help` for a list of commands")]
    Unknown(String),

    #[error("`{0}` expects an argument")]
    MissingArgument(&'static str),

    #[error("Country error")]
    Country(#[from] CountryError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    From(Country),
    To(Country),
    Amount(String),
    Refresh,
    Submit,
    Delete(String),
    Show,
    History,
    Countries,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        let required = |name: &'static str| {
            if arg.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(arg)
            }
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "from" => Self::From(required("from")?.parse()?),
            "to" => Self::To(required("to")?.parse()?),
            "amount" => Self::Amount(arg.to_string()),
            "refresh" => Self::Refresh,
            "submit" => Self::Submit,
            "delete" => Self::Delete(required("delete")?.to_string()),
            "show" => Self::Show,
            "history" => Self::History,
            "countries" => Self::Countries,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::COUNTRIES;

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("from usd").unwrap(),
            Some(Command::From(COUNTRIES[0]))
        );
        assert_eq!(
            Command::parse("TO  Sri Lanka ").unwrap(),
            Some(Command::To(COUNTRIES[4]))
        );
        assert_eq!(
            Command::parse("amount 12.50").unwrap(),
            Some(Command::Amount("12.50".to_string()))
        );
        assert_eq!(
            Command::parse("delete 65f1c2a9").unwrap(),
            Some(Command::Delete("65f1c2a9".to_string()))
        );
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_amount_may_be_empty() {
        assert_eq!(
            Command::parse("amount").unwrap(),
            Some(Command::Amount(String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("convert 5"),
            Err(CommandError::Unknown(name)) if name == "convert"
        ));
        assert!(matches!(
            Command::parse("delete"),
            Err(CommandError::MissingArgument("delete"))
        ));
        assert!(matches!(
            Command::parse("from Atlantis"),
            Err(CommandError::Country(_))
        ));
    }
}
