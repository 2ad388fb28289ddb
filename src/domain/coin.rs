// ============================================================================
// Decimal Coin
// Exact decimal amount paired with its denomination
// ============================================================================

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact decimal quantity of a single denomination.
///
/// Renders as `<amount><denom>` with no separator, e.g. `40.5uatom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecCoin {
    pub denom: String,
    pub amount: Decimal,
}

/// Errors produced when parsing a [`DecCoin`] from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinParseError {
    #[error("missing amount in coin {0:?}")]
    MissingAmount(String),

    #[error("missing denomination in coin {0:?}")]
    MissingDenom(String),

    #[error("invalid denomination {0:?}: must start with a letter and contain only [A-Za-z0-9/:._-]")]
    InvalidDenom(String),

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}

impl DecCoin {
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Zero amount of `denom`
    pub fn zero(denom: impl Into<String>) -> Self {
        Self::new(denom, Decimal::ZERO)
    }

    /// Zero-value sentinel with no denomination
    pub fn empty() -> Self {
        Self::new(String::new(), Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Absolute amount, independent of sign
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn is_denom(&self, denom: &str) -> bool {
        self.denom == denom
    }
}

fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = CoinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // The amount is the longest prefix made of sign, digits and a point
        let split = s
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
            .map(|(i, _)| i)
            .unwrap_or(s.len());

        let (amount, denom) = s.split_at(split);
        if amount.is_empty() || amount == "-" {
            return Err(CoinParseError::MissingAmount(s.to_string()));
        }
        if denom.is_empty() {
            return Err(CoinParseError::MissingDenom(s.to_string()));
        }
        if !is_valid_denom(denom) {
            return Err(CoinParseError::InvalidDenom(denom.to_string()));
        }

        let amount = Decimal::from_str(amount)
            .map_err(|_| CoinParseError::InvalidAmount(amount.to_string()))?;

        Ok(Self::new(denom, amount))
    }
}
