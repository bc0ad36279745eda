//! The balance table: a currency-keyed store of fixed-point amounts.
//!
//! Absence of a key is a distinct state from a zero amount: a currency
//! that was never written is untracked, not zero. The table guarantees
//! no iteration order and provides no internal locking; callers that
//! share one instance across threads must serialize access externally.

use crate::amount::Amount;
use crate::codec::{FixedPointCodec, WalletValue};
use crate::currency::{self, CurrencyKey};
use crate::error::Result;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;

/// A mapping from currency key to fixed-point balance.
///
/// Created empty; mutated only through [`Wallet::set`]. Reads
/// materialize the stored scaled integer into an exact
/// `rust_decimal::Decimal` via the process-wide [`FixedPointCodec`].
///
/// Structural equality between two wallets is deliberately not
/// provided; if a ledger engine needs to compare holdings it owns that
/// comparison.
///
/// # Examples
///
/// ```
/// use wallet_core::Wallet;
///
/// let mut wallet = Wallet::new();
/// wallet.set("USD", "10.5").unwrap();
/// assert_eq!(wallet.len(), 1);
/// assert_eq!(wallet.get("USD").unwrap().unwrap().to_string(), "10.500000000");
/// ```
#[derive(Debug)]
pub struct Wallet {
    /// Balances indexed by interned currency key.
    balances: HashMap<CurrencyKey, Amount>,
}

impl Wallet {
    /// Creates a new empty wallet.
    pub fn new() -> Self {
        Wallet {
            balances: HashMap::new(),
        }
    }

    /// Returns the number of distinct currencies currently tracked.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Returns `true` if no currency is tracked.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Returns the balance for `key` as an exact decimal, or `None` if
    /// the currency is untracked.
    ///
    /// Fails with [`WalletError::InvalidKey`] on a malformed key; a
    /// well-formed but absent key is not an error.
    ///
    /// [`WalletError::InvalidKey`]: crate::WalletError::InvalidKey
    pub fn get(&self, key: &str) -> Result<Option<Decimal>> {
        currency::validate(key)?;
        let codec = FixedPointCodec::resolve()?;
        Ok(self.balances.get(key).map(|&amount| codec.to_decimal(amount)))
    }

    /// Returns the raw fixed-point balance for `key`, or `None` if the
    /// currency is untracked.
    ///
    /// For callers that stay in integer space and do their own
    /// arithmetic on scaled amounts.
    pub fn get_amount(&self, key: &str) -> Result<Option<Amount>> {
        currency::validate(key)?;
        Ok(self.balances.get(key).copied())
    }

    /// Converts `value` to a fixed-point amount and stores it under
    /// `key`, replacing any prior balance (last-write-wins).
    ///
    /// Accepts anything convertible to [`WalletValue`]: a `Decimal`, a
    /// whole number of units (`i64`), an `f64`, or decimal text. On any
    /// error the table is left unmodified.
    pub fn set<'a>(&mut self, key: &str, value: impl Into<WalletValue<'a>>) -> Result<()> {
        let codec = FixedPointCodec::resolve()?;
        let key = CurrencyKey::new(key)?;
        let amount = codec.convert(value.into())?;

        debug!("{}: stored {}", key, amount);
        self.balances.insert(key, amount);
        Ok(())
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Wallet {
    /// A fixed debug label; not a serialization format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<Wallet>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WalletError;
    use std::str::FromStr;

    #[test]
    fn test_new_wallet_is_empty() {
        let wallet = Wallet::new();
        assert_eq!(wallet.len(), 0);
        assert!(wallet.is_empty());
    }

    #[test]
    fn test_absent_key_is_none_not_zero() {
        let wallet = Wallet::new();
        assert_eq!(wallet.get("USD").unwrap(), None);
        assert_eq!(wallet.get_amount("USD").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut wallet = Wallet::new();
        wallet.set("USD", "10.5").unwrap();

        let balance = wallet.get("USD").unwrap().unwrap();
        assert_eq!(balance.to_string(), "10.500000000");
        assert_eq!(balance, Decimal::from_str("10.5").unwrap());
        assert_eq!(
            wallet.get_amount("USD").unwrap(),
            Some(Amount::from_raw(10_500_000_000))
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut wallet = Wallet::new();
        wallet.set("USD", "10.5").unwrap();
        wallet.set("USD", "3.25").unwrap();

        assert_eq!(wallet.len(), 1);
        let balance = wallet.get("USD").unwrap().unwrap();
        assert_eq!(balance, Decimal::from_str("3.25").unwrap());
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut wallet = Wallet::new();
        wallet.set("USD", "7.125").unwrap();
        let first = wallet.get_amount("USD").unwrap();
        wallet.set("USD", "7.125").unwrap();

        assert_eq!(wallet.get_amount("USD").unwrap(), first);
        assert_eq!(wallet.len(), 1);
    }

    #[test]
    fn test_multi_currency_independence() {
        let mut wallet = Wallet::new();
        wallet.set("USD", 10i64).unwrap();
        wallet.set("EUR", 5i64).unwrap();

        assert_eq!(wallet.len(), 2);
        assert_eq!(
            wallet.get("USD").unwrap().unwrap(),
            Decimal::from_str("10").unwrap()
        );
        assert_eq!(
            wallet.get("EUR").unwrap().unwrap(),
            Decimal::from_str("5").unwrap()
        );
    }

    #[test]
    fn test_invalid_key_rejected_and_table_unchanged() {
        let mut wallet = Wallet::new();
        wallet.set("USD", 1i64).unwrap();

        assert!(matches!(
            wallet.set("", 2i64),
            Err(WalletError::InvalidKey { .. })
        ));
        assert!(matches!(
            wallet.get("US D"),
            Err(WalletError::InvalidKey { .. })
        ));
        assert_eq!(wallet.len(), 1);
        assert_eq!(
            wallet.get_amount("USD").unwrap(),
            Some(Amount::from_units(1).unwrap())
        );
    }

    #[test]
    fn test_unconvertible_value_leaves_prior_state() {
        let mut wallet = Wallet::new();

        assert!(matches!(
            wallet.set("USD", "not-a-number"),
            Err(WalletError::Conversion { .. })
        ));
        assert_eq!(wallet.get("USD").unwrap(), None);

        wallet.set("USD", "1.5").unwrap();
        assert!(wallet.set("USD", "still-not-a-number").is_err());
        assert_eq!(
            wallet.get("USD").unwrap().unwrap(),
            Decimal::from_str("1.5").unwrap()
        );
    }

    #[test]
    fn test_nine_digit_precision_boundary() {
        let mut wallet = Wallet::new();
        wallet.set("USD", "0.000000001").unwrap();

        let balance = wallet.get("USD").unwrap().unwrap();
        assert_eq!(balance, Decimal::from_str("0.000000001").unwrap());
        assert!(!balance.is_zero());
        assert_eq!(wallet.get_amount("USD").unwrap(), Some(Amount::from_raw(1)));
    }

    #[test]
    fn test_display_is_fixed_label() {
        let mut wallet = Wallet::new();
        assert_eq!(wallet.to_string(), "<Wallet>");
        wallet.set("USD", 1i64).unwrap();
        assert_eq!(wallet.to_string(), "<Wallet>");
    }
}
