//! A fixed-point amount of money with two fractional digits.

use std::{fmt, str::FromStr};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// An amount of money, stored as a whole number of cents.
///
/// Amounts are serialized as decimal strings with exactly two fractional
/// digits, e.g. `"4.50"`, and stored in the database as an integer number of
/// cents.
///
/// Converting a value with more than two fractional digits rounds it to the
/// nearest cent, with ties rounded away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub struct Amount(i64);

impl Amount {
    /// The largest amount the `transactions` table accepts, 99,999,999.99.
    pub const MAX: Amount = Amount(9_999_999_999);

    /// The smallest amount the `transactions` table accepts, -99,999,999.99.
    pub const MIN: Amount = Amount(-9_999_999_999);

    /// Create an amount from a whole number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount as a whole number of cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// The amount as a decimal with a scale of two.
    pub fn as_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.as_decimal()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Error;

    /// Round `value` to the nearest cent.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the number of cents does not fit in an `i64`.
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Amount)
            .ok_or_else(|| Error::InvalidAmount(value.to_string()))
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Parse a decimal string such as `"4.50"`, `" -12 "` or `"1.5e3"`.
    ///
    /// Numbers too small for a [Decimal], e.g. `"1e-30"`, round to zero.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();

        match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
            Ok(value) => Amount::try_from(value),
            Err(_) => match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() && value.abs() < 0.005 => Ok(Amount(0)),
                _ => Err(Error::InvalidAmount(format!("{text:?}"))),
            },
        }
    }
}

impl TryFrom<&Value> for Amount {
    type Error = Error;

    /// Coerce a JSON number or numeric string into an amount.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] for any other kind of JSON value, for
    /// strings that are not numbers and for numbers too large to represent.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => number.to_string().parse(),
            Value::String(text) => text.parse(),
            other => Err(Error::InvalidAmount(other.to_string())),
        }
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Amount)
    }
}
