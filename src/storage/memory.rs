use std::sync::Mutex;

use crate::error_handling::StorageError;

use super::KeyStore;

/// In-process key store.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    value: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> Option<String> {
        let guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        guard.clone().filter(|key| !key.is_empty())
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        let mut guard = self.value.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryKeyStore::new();
        assert_eq!(store.load(), None);
        store.save("abc").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_value_loads_as_none() {
        assert_eq!(MemoryKeyStore::with_key("").load(), None);
    }
}
