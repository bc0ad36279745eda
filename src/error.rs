//! Error types for the wallet core.

use thiserror::Error;

/// Result type alias for wallet operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Errors that can occur while operating on a wallet.
#[derive(Error, Debug)]
pub enum WalletError {
    /// A supplied currency key is not a valid identifier
    #[error("invalid currency key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// A supplied value could not be converted to a fixed-point amount,
    /// either because it is unparsable or because the scaled result
    /// overflows the 64-bit representation
    #[error("cannot convert {value:?} to a fixed-point amount: {reason}")]
    Conversion { value: String, reason: String },

    /// The arbitrary-precision decimal backend could not be resolved at
    /// startup; no `get` or `set` call can be served until it is
    #[error("decimal backend unavailable: {0}")]
    Backend(String),
}

impl WalletError {
    pub(crate) fn invalid_key(key: &str, reason: &'static str) -> Self {
        WalletError::InvalidKey {
            key: key.to_string(),
            reason,
        }
    }

    pub(crate) fn conversion(value: impl Into<String>, reason: impl Into<String>) -> Self {
        WalletError::Conversion {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
