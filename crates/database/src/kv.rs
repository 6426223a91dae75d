//! Key-value store interface.
use crate::DBErrorMarker;
use auto_impl::auto_impl;
use core::convert::Infallible;
use std::{collections::BTreeMap, vec::Vec};

/// Byte keyed store side tables are kept in.
#[auto_impl(&mut, Box)]
pub trait KeyValueStore {
    /// The store error type.
    type Error: DBErrorMarker;

    /// Returns the value stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), Self::Error>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), Self::Error>;
}

/// In-memory [KeyValueStore].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryKvStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryKvStore {
    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    type Error = Infallible;

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), Self::Error> {
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), Self::Error> {
        self.entries.remove(key);
        Ok(())
    }
}
