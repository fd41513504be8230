//! Fixed-point currency (2 decimal places)
//!
//! Balances and prices are stored as a whole number of cents. JSON and other
//! human-readable formats see a decimal number (`12.5`), binary formats see
//! the raw cent count.

use crate::error::{CoreError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Cents per currency unit
pub const CENTS_PER_UNIT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    /// Whole currency units, e.g. `from_units(10)` is `10.00`
    pub const fn from_units(units: u64) -> Self {
        Amount(units * CENTS_PER_UNIT)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal value such as `12.34`.
    ///
    /// Rejects negative, non-finite and sub-cent values.
    pub fn from_decimal(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidAmount(format!("{} is not finite", value)));
        }
        if value < 0.0 {
            return Err(CoreError::InvalidAmount(format!("{} is negative", value)));
        }

        let scaled = value * CENTS_PER_UNIT as f64;
        let cents = scaled.round();
        if (scaled - cents).abs() > 1e-6 {
            return Err(CoreError::InvalidAmount(format!(
                "{} has more than 2 decimal places",
                value
            )));
        }
        if cents > u64::MAX as f64 {
            return Err(CoreError::InvalidAmount(format!("{} is too large", value)));
        }

        Ok(Amount(cents as u64))
    }

    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// `percent`% of this amount, rounded half-up to the cent
    pub fn percent(self, percent: u64) -> Amount {
        let scaled = self.0 as u128 * percent as u128 + 50;
        Amount(u64::try_from(scaled / 100).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT
        )
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_f64(self.to_decimal())
        } else {
            serializer.serialize_u64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let value = f64::deserialize(deserializer)?;
            Amount::from_decimal(value).map_err(de::Error::custom)
        } else {
            u64::deserialize(deserializer).map(Amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal() {
        assert_eq!(Amount::from_decimal(12.34).unwrap(), Amount::from_cents(1234));
        assert_eq!(Amount::from_decimal(0.1).unwrap(), Amount::from_cents(10));
        assert_eq!(Amount::from_decimal(100.0).unwrap(), Amount::from_units(100));
    }

    #[test]
    fn test_from_decimal_rejects_bad_values() {
        assert!(Amount::from_decimal(-1.0).is_err());
        assert!(Amount::from_decimal(f64::NAN).is_err());
        assert!(Amount::from_decimal(f64::INFINITY).is_err());
        assert!(Amount::from_decimal(1.234).is_err());
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 5% of 2.50 is 0.125 -> 0.13
        assert_eq!(Amount::from_cents(250).percent(5), Amount::from_cents(13));
        assert_eq!(Amount::from_units(200).percent(5), Amount::from_units(10));
        assert_eq!(Amount::from_units(100).percent(90), Amount::from_units(90));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::from_cents(1205).to_string(), "12.05");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_json_is_decimal() {
        let json = serde_json::to_string(&Amount::from_cents(4050)).unwrap();
        assert_eq!(json, "40.5");

        let parsed: Amount = serde_json::from_str("19.99").unwrap();
        assert_eq!(parsed, Amount::from_cents(1999));

        assert!(serde_json::from_str::<Amount>("-5").is_err());
    }

    #[test]
    fn test_checked_sub_never_goes_negative() {
        let balance = Amount::from_units(5);
        assert_eq!(balance.checked_sub(Amount::from_units(80)), None);
        assert_eq!(
            balance.checked_sub(Amount::from_units(2)),
            Some(Amount::from_units(3))
        );
    }
}
