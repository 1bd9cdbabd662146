//! Key-value storage capability.
//!
//! Every store in this crate persists a whole JSON document per key and
//! rewrites it on each mutation. Backends only need `get`, `set` and `remove`
//! over string keys, so a file directory, an in-memory map or any other
//! key-value service can stand behind them.

mod file;
mod memory;
mod records;

pub use file::FileStore;
pub use memory::MemoryStore;
pub(crate) use records::Records;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Top-level keys used by the stores.
pub mod keys {
    pub const ORDERS: &str = "kingkart_orders";
    pub const CART: &str = "kingkart_cart";
    pub const MEASUREMENT_PROFILES: &str = "kingkart_measurement_profiles";
    pub const SERVICES: &str = "kingkart_services";
    pub const ADMIN_SESSION: &str = "kingkart_admin_session";
    pub const CUSTOMER_SESSION: &str = "kingkart_customer_session";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Low-level string store. Missing keys read as `None`, removing a missing
/// key is not an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and parses the document at `key`.
///
/// Missing and malformed documents both come back as `None`; malformed ones
/// are logged and otherwise ignored.
pub(crate) fn load<T: DeserializeOwned>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed document, treating as empty");
            Ok(None)
        }
    }
}

pub(crate) fn load_or_default<T: DeserializeOwned + Default>(
    kv: &dyn KeyValueStore,
    key: &str,
) -> Result<T, StorageError> {
    Ok(load(kv, key)?.unwrap_or_default())
}

pub(crate) fn save<T: Serialize + ?Sized>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> crate::Result<()> {
    let raw = serde_json::to_string(value)?;
    kv.set(key, raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_none() {
        let kv = MemoryStore::new();
        let value: Option<Vec<u32>> = load(&kv, "absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_malformed_json_fails_open() {
        let kv = MemoryStore::new();
        kv.set(keys::ORDERS, "{not json".to_string()).unwrap();
        let value: Vec<u32> = load_or_default(&kv, keys::ORDERS).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let kv = MemoryStore::new();
        save(&kv, "numbers", &vec![1u32, 2, 3]).unwrap();
        let value: Vec<u32> = load_or_default(&kv, "numbers").unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }
}
