//! Currency key type: a validated short text identifier.
//!
//! Keys like `"USD"` are short and drawn from a small alphabet, so the
//! crate keeps a process-wide intern pool and shares one allocation per
//! distinct key. Interning is purely a memory optimization: equality,
//! hashing, and ordering always go by content, never by allocation
//! identity.

use crate::error::{Result, WalletError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// Maximum accepted key length in bytes.
const MAX_KEY_LEN: usize = 64;

static INTERN_POOL: OnceLock<Mutex<HashSet<Arc<str>>>> = OnceLock::new();

/// An immutable currency identifier, e.g. `"USD"` or `"EUR"`.
///
/// Construction validates the identifier and interns it; clones are
/// cheap reference bumps of the shared allocation.
#[derive(Debug, Clone)]
pub struct CurrencyKey(Arc<str>);

impl CurrencyKey {
    /// Validates and interns a currency identifier.
    ///
    /// A valid key is non-empty, at most 64 bytes, and printable ASCII
    /// with no whitespace. Returns [`WalletError::InvalidKey`] otherwise.
    pub fn new(key: &str) -> Result<Self> {
        validate(key)?;
        Ok(CurrencyKey(intern(key)))
    }

    /// Returns the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[cfg(test)]
    pub(crate) fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Checks that `key` is a valid currency identifier without interning it.
///
/// Used on the read path so that lookups of malformed or merely absent
/// keys never populate the intern pool.
pub(crate) fn validate(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(WalletError::invalid_key(key, "empty"));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(WalletError::invalid_key(key, "longer than 64 bytes"));
    }
    if !key.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(WalletError::invalid_key(
            key,
            "must be printable ASCII without whitespace",
        ));
    }
    Ok(())
}

/// Returns the pool's shared allocation for `key`, inserting it on
/// first sight.
fn intern(key: &str) -> Arc<str> {
    let pool = INTERN_POOL.get_or_init(|| Mutex::new(HashSet::new()));
    let mut guard = match pool.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Some(existing) = guard.get(key) {
        return Arc::clone(existing);
    }

    let shared: Arc<str> = Arc::from(key);
    guard.insert(Arc::clone(&shared));
    shared
}

impl PartialEq for CurrencyKey {
    fn eq(&self, other: &Self) -> bool {
        // Pointer check is a fast path only; content comparison decides.
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for CurrencyKey {}

impl Hash for CurrencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must match `str`'s hash so maps can be queried by `&str`.
        self.as_str().hash(state);
    }
}

impl Borrow<str> for CurrencyKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CurrencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CurrencyKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CurrencyKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CurrencyKey::new(&s).map_err(serde::de::Error::custom)
    }
}
