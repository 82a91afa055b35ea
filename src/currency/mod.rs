//! Exact conversion between decimal display amounts and integer minor units.
//!
//! The wizard collects fees as decimals while the backend stores integers in
//! the currency's base unit. Conversion rounds to the nearest minor unit and
//! refuses anything outside the range an `f64` represents without loss.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest magnitude for which every integer is exactly representable as `f64`.
pub const MAX_EXACT_MINOR_UNITS: i64 = 1 << 53;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurrencyError {
    #[error("Amount must be a finite number")]
    NotFinite,
    #[error("Amount must be zero or positive")]
    Negative,
    #[error("Amount is too large")]
    Overflow,
    #[error("Enter a numeric amount: {0}")]
    Parse(String),
}

/// ISO 4217 style currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("SAT")
    }
}

/// Integer amount expressed in a currency's base unit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    pub const ZERO: MinorUnits = MinorUnits(0);

    /// Converts a decimal display amount, rounding to the nearest minor unit.
    ///
    /// `12.5` with 100 minor units per unit yields `1250`.
    pub fn from_decimal(value: f64, per_unit: u32) -> Result<Self, CurrencyError> {
        if !value.is_finite() {
            return Err(CurrencyError::NotFinite);
        }
        if value < 0.0 {
            return Err(CurrencyError::Negative);
        }
        let scaled = (value * f64::from(per_unit)).round();
        if scaled > MAX_EXACT_MINOR_UNITS as f64 {
            return Err(CurrencyError::Overflow);
        }
        Ok(Self(scaled as i64))
    }

    /// Parses a decimal string without going through floating point.
    ///
    /// Only available when `per_unit` is a power of ten; other factors fall
    /// back to [`MinorUnits::from_decimal`].
    pub fn parse(input: &str, per_unit: u32) -> Result<Self, CurrencyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CurrencyError::Parse("value is empty".into()));
        }
        if trimmed.starts_with('-') {
            return Err(CurrencyError::Negative);
        }
        let Some(places) = decimal_places(per_unit) else {
            let value = trimmed
                .parse::<f64>()
                .map_err(|_| CurrencyError::Parse(trimmed.to_string()))?;
            return Self::from_decimal(value, per_unit);
        };

        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (trimmed, ""),
        };
        let all_digits = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(CurrencyError::Parse(trimmed.to_string()));
        }
        if frac_part.len() > places as usize {
            return Err(CurrencyError::Parse(format!(
                "{trimmed} has more than {places} decimal places"
            )));
        }

        let whole: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| CurrencyError::Overflow)?
        };
        let mut fraction: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part
                .parse()
                .map_err(|_| CurrencyError::Parse(trimmed.to_string()))?
        };
        for _ in frac_part.len()..places as usize {
            fraction *= 10;
        }

        let total = whole
            .checked_mul(i64::from(per_unit))
            .and_then(|value| value.checked_add(fraction))
            .ok_or(CurrencyError::Overflow)?;
        if total > MAX_EXACT_MINOR_UNITS {
            return Err(CurrencyError::Overflow);
        }
        Ok(Self(total))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self, per_unit: u32) -> f64 {
        self.0 as f64 / f64::from(per_unit.max(1))
    }
}

fn decimal_places(per_unit: u32) -> Option<u32> {
    let mut remaining = per_unit;
    let mut places = 0;
    while remaining > 1 {
        if remaining % 10 != 0 {
            return None;
        }
        remaining /= 10;
        places += 1;
    }
    (remaining == 1).then_some(places)
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "BTC" => "₿".into(),
        "SAT" => "sats".into(),
        _ => code.into(),
    }
}

/// Renders a whole display amount with grouping, e.g. `1,250 sats`.
pub fn format_amount(value: f64, code: &CurrencyCode) -> String {
    let body = group_digits(&format!("{:.0}", value.abs().trunc()), ',');
    let sign = if value < 0.0 { "-" } else { "" };
    match code.as_str() {
        "SAT" => format!("{sign}{body} sats"),
        other => format!("{sign}{}{body}", symbol_for(other)),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
