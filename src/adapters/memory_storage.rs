//! In-memory key/value storage.
//!
//! Implements [`StoragePort`] with a `HashMap` keyed by
//! `namespace::key`.  Used by the binary and the tests; a durable backend
//! would implement the same trait.

use std::collections::HashMap;

use crate::app::ports::{StorageError, StoragePort};

/// Optional cap on stored bytes, for exercising the `Full` path.
pub struct MemoryStorage {
    store: HashMap<String, Vec<u8>>,
    capacity_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            capacity_bytes: None,
        }
    }

    /// Storage that refuses writes once `bytes` are in use.
    pub fn with_capacity_bytes(bytes: usize) -> Self {
        Self {
            capacity_bytes: Some(bytes),
            ..Self::new()
        }
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    fn used_bytes(&self) -> usize {
        self.store.values().map(Vec::len).sum()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        match self.store.get(&Self::composite_key(namespace, key)) {
            Some(data) => {
                let len = data.len().min(buf.len());
                buf[..len].copy_from_slice(&data[..len]);
                Ok(len)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let composite = Self::composite_key(namespace, key);
        if let Some(cap) = self.capacity_bytes {
            let replaced = self.store.get(&composite).map_or(0, Vec::len);
            if self.used_bytes() - replaced + data.len() > cap {
                return Err(StorageError::Full);
            }
        }
        self.store.insert(composite, data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.contains_key(&Self::composite_key(namespace, key))
    }
}
