//! In-memory token store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{Error, TokenStore};

/// A process-local token store.
///
/// Values live for as long as the store does. This is the default store of
/// an `Api` and the natural test double.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single entry.
    pub fn with_token(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: RwLock::new(values),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let values = self.values.read().map_err(|_| Error::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut values = self.values.write().map_err(|_| Error::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
