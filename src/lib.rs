//! # Wallet Core
//!
//! An in-memory multi-currency balance table backed by fixed-point
//! arithmetic, for accounting engines that must never lose fractional
//! units to binary floating-point drift.
//!
//! ## Design Principles
//!
//! - **Fixed-point storage**: balances are scaled 64-bit integers with
//!   nine implied decimal digits; decimals appear only at the API edge
//! - **Exact conversion**: reads materialize balances through
//!   `rust_decimal` with no rounding inside the representable range
//! - **Absence is not zero**: an untracked currency reads back as
//!   `None`, never as a zero balance
//! - **Interned keys**: currency identifiers share one allocation per
//!   distinct key; equality is always by content
//!
//! ## Example
//!
//! ```
//! use wallet_core::Wallet;
//!
//! let mut wallet = Wallet::new();
//! wallet.set("USD", "10.5").unwrap();
//! wallet.set("EUR", 5i64).unwrap();
//!
//! assert_eq!(wallet.len(), 2);
//! assert_eq!(wallet.get("USD").unwrap().unwrap().to_string(), "10.500000000");
//! assert!(wallet.get("JPY").unwrap().is_none());
//! ```

pub mod amount;
pub mod codec;
pub mod currency;
pub mod error;
pub mod wallet;

pub use amount::Amount;
pub use codec::{FixedPointCodec, WalletValue};
pub use currency::CurrencyKey;
pub use error::{Result, WalletError};
pub use wallet::Wallet;
