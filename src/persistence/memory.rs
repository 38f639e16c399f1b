use std::collections::HashMap;

use super::{Storage, StorageError};

/// In-memory store. `failing()` builds one that rejects every call.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    fail: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that behaves like disabled browser storage
    pub fn failing() -> Self {
        Self {
            items: HashMap::new(),
            fail: true,
        }
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
