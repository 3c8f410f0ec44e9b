//! Credential persistence.

use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("token storage unavailable: {0}")]
    Unavailable(String),

    #[error("token storage rejected the write: {0}")]
    Write(String),
}

/// Holder of the single bearer credential.
///
/// At most one credential exists at a time: `save` overwrites, `clear`
/// removes. `get` never yields an empty string.
pub trait TokenStore {
    fn save(&self, token: &str) -> Result<(), StoreError>;

    fn get(&self) -> Option<String>;

    fn clear(&self) -> Result<(), StoreError>;
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        (**self).save(token)
    }

    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// Process-local store; clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        let slot = self.slot.read().ok()?;
        slot.as_ref().filter(|t| !t.is_empty()).cloned()
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
