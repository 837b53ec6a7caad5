use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Reading must be a number, got {0:?}")]
    Reading(String),
    #[error("Subscriber ID must be a whole number, got {0:?}")]
    SubscriberId(String),
}

/// How free-text numeric input from the add form becomes a number.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Anything unparseable silently becomes zero.
    #[default]
    CoerceInvalidToZero,
    /// Unparseable input is rejected with a `ParseError`.
    Strict,
}

impl ParsePolicy {
    pub fn parse_reading(&self, text: &str) -> Result<f64, ParseError> {
        match (parse_finite(text), self) {
            (Some(value), _) => Ok(value),
            (None, ParsePolicy::CoerceInvalidToZero) => Ok(0.0),
            (None, ParsePolicy::Strict) => Err(ParseError::Reading(text.to_string())),
        }
    }

    pub fn parse_subscriber_id(&self, text: &str) -> Result<i32, ParseError> {
        match (text.trim().parse::<i32>().ok(), self) {
            (Some(value), _) => Ok(value),
            (None, ParsePolicy::CoerceInvalidToZero) => Ok(0),
            (None, ParsePolicy::Strict) => Err(ParseError::SubscriberId(text.to_string())),
        }
    }
}

// NaN would be bound as NULL by SQLite, so non-finite values count as invalid.
fn parse_finite(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
