use super::backend::StorageBackend;
use crate::error::{Result, StoreError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` without a lock.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation (e.g. quota exceeded) for testing.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Put a raw value into a slot, bypassing any encoding.
    pub fn put_raw(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemBackend {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(StoreError::Storage("Simulated write error".to_string()));
        }
        self.put_raw(key, value);
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(StoreError::Storage("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
