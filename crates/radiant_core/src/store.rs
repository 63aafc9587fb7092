use crate::error::StoreError;
use crate::traits::KeyValueStore;

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A process-local [`KeyValueStore`]. Clones share the same slots.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map(|slots| slots.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_slots<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Bytes>) -> T,
    ) -> Result<T, StoreError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StoreError::Generic("Memory store mutex poisoned".into()))?;
        Ok(f(&mut slots))
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        self.with_slots(|slots| slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Bytes) -> Result<(), StoreError> {
        self.with_slots(|slots| {
            slots.insert(key.to_string(), value);
        })
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.with_slots(|slots| {
            slots.remove(key);
        })
    }
}
