//! Conversion between fixed-point amounts and arbitrary-precision decimals.
//!
//! The codec is the only place the crate touches the decimal backend
//! (`rust_decimal`). It is resolved once per process and treated as
//! read-only state afterwards; resolution probes the backend and fails
//! loudly if it cannot honor the nine-digit scale, so that every later
//! `get`/`set` can rely on it.

use crate::amount::Amount;
use crate::error::{Result, WalletError};
use log::debug;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use std::sync::OnceLock;

static CODEC: OnceLock<FixedPointCodec> = OnceLock::new();

/// A value accepted on the write path: an arbitrary-precision decimal,
/// a number, or parseable text.
#[derive(Debug, Clone)]
pub enum WalletValue<'a> {
    /// An arbitrary-precision decimal value.
    Decimal(Decimal),

    /// A whole number of currency units.
    Integer(i64),

    /// A binary floating-point number; converted through the decimal
    /// backend, so NaN and infinities are rejected.
    Float(f64),

    /// Decimal text, e.g. `"10.5"` or `"-0.000000001"`.
    Text(&'a str),
}

impl From<Decimal> for WalletValue<'_> {
    fn from(value: Decimal) -> Self {
        WalletValue::Decimal(value)
    }
}

impl From<i64> for WalletValue<'_> {
    fn from(value: i64) -> Self {
        WalletValue::Integer(value)
    }
}

impl From<f64> for WalletValue<'_> {
    fn from(value: f64) -> Self {
        WalletValue::Float(value)
    }
}

impl<'a> From<&'a str> for WalletValue<'a> {
    fn from(value: &'a str) -> Self {
        WalletValue::Text(value)
    }
}

/// Lossless converter between [`Amount`] and `rust_decimal::Decimal`.
///
/// # Rounding Policy
///
/// Inputs with more than nine fractional digits are rounded to the
/// nearest representable amount with ties going to the even neighbor
/// (banker's rounding). Within nine fractional digits the conversion
/// is exact in both directions.
#[derive(Debug)]
pub struct FixedPointCodec {
    _priv: (),
}

impl FixedPointCodec {
    /// Resolves the process-wide codec, probing the decimal backend on
    /// first use.
    ///
    /// Returns [`WalletError::Backend`] if the backend cannot represent
    /// amounts at the nine-digit scale. Subsequent calls are cheap reads
    /// of the already-resolved instance.
    pub fn resolve() -> Result<&'static Self> {
        if let Some(codec) = CODEC.get() {
            return Ok(codec);
        }

        let codec = Self::probe()?;
        debug!("fixed-point codec resolved, scale={}", Amount::SCALE);
        Ok(CODEC.get_or_init(|| codec))
    }

    /// Constructs a candidate codec and verifies the backend honors the
    /// fixed scale by round-tripping the smallest and largest amounts.
    fn probe() -> Result<Self> {
        let codec = FixedPointCodec { _priv: () };

        for raw in [1i64, -1, i64::MAX, i64::MIN] {
            let amount = Amount::from_raw(raw);
            let decimal = codec.to_decimal(amount);
            let back = codec.from_decimal(decimal).map_err(|e| {
                WalletError::Backend(format!("probe conversion failed for {amount}: {e}"))
            })?;
            if back != amount {
                return Err(WalletError::Backend(format!(
                    "probe round-trip mismatch: {amount} came back as {back}"
                )));
            }
        }

        Ok(codec)
    }

    /// Converts a fixed-point amount into its exact decimal value.
    ///
    /// The result carries scale 9, so its textual form has exactly nine
    /// fractional digits and re-parses to the original raw integer.
    pub fn to_decimal(&self, amount: Amount) -> Decimal {
        // Any i64 mantissa fits the backend's 96-bit coefficient.
        Decimal::from_i128_with_scale(amount.raw() as i128, Amount::SCALE)
    }

    /// Converts a decimal value into a fixed-point amount.
    ///
    /// Rounds to nine fractional digits (midpoint-nearest-even), then
    /// rescales into the raw integer. Fails when the scaled result
    /// overflows 64 bits.
    pub fn from_decimal(&self, value: Decimal) -> Result<Amount> {
        let rounded =
            value.round_dp_with_strategy(Amount::SCALE, RoundingStrategy::MidpointNearestEven);

        // rounded.scale() <= SCALE after rounding; pad the mantissa up
        // to the fixed scale in exact integer arithmetic.
        let exponent = Amount::SCALE - rounded.scale();
        let raw = rounded
            .mantissa()
            .checked_mul(10i128.pow(exponent))
            .and_then(|scaled| i64::try_from(scaled).ok())
            .ok_or_else(|| {
                WalletError::conversion(
                    value.to_string(),
                    "scaled value overflows the 64-bit fixed-point range",
                )
            })?;

        Ok(Amount::from_raw(raw))
    }

    /// Parses decimal text into a fixed-point amount.
    pub fn parse(&self, text: &str) -> Result<Amount> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(WalletError::conversion(text, "empty value"));
        }

        let decimal = Decimal::from_str(trimmed)
            .map_err(|e| WalletError::conversion(text, e.to_string()))?;
        self.from_decimal(decimal)
    }

    /// Converts any accepted write-path value into a fixed-point amount.
    pub fn convert(&self, value: WalletValue<'_>) -> Result<Amount> {
        match value {
            WalletValue::Decimal(d) => self.from_decimal(d),
            WalletValue::Integer(units) => Amount::from_units(units),
            WalletValue::Float(f) => {
                let decimal = Decimal::from_f64(f).ok_or_else(|| {
                    WalletError::conversion(f.to_string(), "not a finite number")
                })?;
                self.from_decimal(decimal)
            }
            WalletValue::Text(s) => self.parse(s),
        }
    }
}
