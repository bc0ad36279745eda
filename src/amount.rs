//! Fixed-point amount type with 9 decimal places of precision.
//!
//! Balances are stored as a signed 64-bit integer scaled by `10^9`,
//! so monetary quantities never pick up binary floating-point error.

use crate::codec::FixedPointCodec;
use crate::error::WalletError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A monetary quantity encoded as a scaled 64-bit integer.
///
/// The scale factor is a process-wide constant of `10^9`: an `Amount`
/// with raw value `1` is one billionth of a currency unit, and
/// `1_000_000_000` is exactly one unit. Conversion to and from the
/// external decimal form is handled by [`FixedPointCodec`].
///
/// # Examples
///
/// ```
/// use wallet_core::Amount;
///
/// let amount = Amount::from_raw(3_250_000_000);
/// assert_eq!(amount.to_string(), "3.250000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// The number of implied fractional decimal digits.
    pub const SCALE: u32 = 9;

    /// The scale factor relating the raw integer to whole currency units.
    pub const UNIT: i64 = 1_000_000_000;

    /// Zero value.
    pub const ZERO: Self = Amount(0);

    /// Creates an `Amount` from an already-scaled raw integer.
    pub const fn from_raw(raw: i64) -> Self {
        Amount(raw)
    }

    /// Returns the raw scaled integer.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Creates an `Amount` from a number of whole currency units.
    ///
    /// Fails when `units * 10^9` overflows the 64-bit representation.
    pub fn from_units(units: i64) -> Result<Self, WalletError> {
        units
            .checked_mul(Self::UNIT)
            .map(Amount)
            .ok_or_else(|| {
                WalletError::conversion(
                    units.to_string(),
                    "scaled value overflows the 64-bit fixed-point range",
                )
            })
    }

    /// Returns `true` if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Amount {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixedPointCodec::resolve()?.parse(s)
    }
}

impl fmt::Display for Amount {
    /// Renders the amount with exactly nine fractional digits,
    /// zero-padded, e.g. `-0.000000001` or `10.500000000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let magnitude = self.0.unsigned_abs();
        let unit = Self::UNIT as u64;
        write!(f, "{}.{:09}", magnitude / unit, magnitude % unit)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_nine_fractional_digits() {
        assert_eq!(Amount::from_raw(0).to_string(), "0.000000000");
        assert_eq!(Amount::from_raw(1).to_string(), "0.000000001");
        assert_eq!(Amount::from_raw(10_500_000_000).to_string(), "10.500000000");
        assert_eq!(Amount::from_raw(Amount::UNIT).to_string(), "1.000000000");
    }

    #[test]
    fn test_display_negative_below_one_unit() {
        assert_eq!(Amount::from_raw(-1).to_string(), "-0.000000001");
        assert_eq!(Amount::from_raw(-500_000_000).to_string(), "-0.500000000");
    }

    #[test]
    fn test_display_extremes() {
        assert_eq!(
            Amount::from_raw(i64::MAX).to_string(),
            "9223372036.854775807"
        );
        assert_eq!(
            Amount::from_raw(i64::MIN).to_string(),
            "-9223372036.854775808"
        );
    }

    #[test]
    fn test_from_units() {
        assert_eq!(Amount::from_units(10).unwrap().raw(), 10_000_000_000);
        assert_eq!(Amount::from_units(-3).unwrap().raw(), -3_000_000_000);
    }

    #[test]
    fn test_from_units_overflow() {
        assert!(matches!(
            Amount::from_units(i64::MAX / 2),
            Err(WalletError::Conversion { .. })
        ));
    }

    #[test]
    fn test_zero_constant() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::from_raw(1).is_zero());
    }

    #[test]
    fn test_from_str_round_trips_display() {
        let amount = Amount::from_raw(321_123_456_789);
        let parsed = Amount::from_str(&amount.to_string()).unwrap();
        assert_eq!(parsed, amount);
    }
}
