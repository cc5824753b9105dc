//! Prices

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Shown in place of a price that cannot be read as a decimal.
pub const UNAVAILABLE_PRICE: &str = "N/A";

/// Product price in whichever JSON representation the server stored it.
///
/// The representation the server sent is kept so that a product can be written back
/// without its price changing shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// JSON number, e.g. `12.5`.
    Number(Number),

    /// JSON string, e.g. `"12.50"`.
    Text(String),

    /// Anything else, `null` included; never readable as a decimal.
    Other(Value),
}

impl Default for Price {
    fn default() -> Self {
        Self::Other(Value::Null)
    }
}

impl Price {
    /// Interpret the price as a decimal, if possible.
    #[must_use]
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(number) => parse_decimal(&number.to_string()),
            Self::Text(text) => parse_decimal(text.trim()),
            Self::Other(_) => None,
        }
    }

    /// Price rounded to two decimal places, or [`UNAVAILABLE_PRICE`].
    #[must_use]
    pub fn display(&self) -> String {
        self.to_decimal().map_or_else(
            || UNAVAILABLE_PRICE.to_string(),
            |value| {
                let rounded =
                    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

                format!("{rounded:.2}")
            },
        )
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Number::from_str(&value.normalize().to_string())
            .map_or_else(|_err| Self::Text(value.to_string()), Self::Number)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_err| Decimal::from_scientific(value))
        .ok()
}
