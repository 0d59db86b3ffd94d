use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    MissingSeparator(String),

    #[error("Key cannot be empty in --set value '{0}'.")]
    EmptyKey(String),

    #[error("Invalid {expected} value for {key}: '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Splits `KEY=VALUE` at the first `=`. Surrounding whitespace is trimmed from both parts.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(input.to_string()));
    }
    Ok((key, value.trim()))
}

pub fn parse_value<T: FromStr>(key: &str, value: &str, expected: &'static str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    })
}
