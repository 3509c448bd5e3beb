use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::KVError;

/// KVStore provides a byte-oriented key-value storage interface.
///
/// Keys follow a namespaced convention: `session:token`, `session:user`, etc.
/// Every call goes to the backend; implementations must not cache values in
/// front of it, so a write from one handle is visible to the next read from
/// any other handle on the same store.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), KVError>;
}

/// JSON helpers available on every [`KVStore`], including trait objects.
pub trait KVStoreExt {
    /// Read and deserialize a JSON value. Returns None if the key is missing.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KVError>;

    /// Serialize a value as JSON and store it.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), KVError>;
}

impl<S: KVStore + ?Sized> KVStoreExt for S {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KVError> {
        match self.get(key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| KVError::Serialization(format!("{}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), KVError> {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| KVError::Serialization(format!("{}: {}", key, e)))?;
        self.set(key, &bytes)
    }
}
