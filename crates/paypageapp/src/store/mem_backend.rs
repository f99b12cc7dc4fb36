use super::backend::StorageBackend;
use crate::error::{PaypageError, Result};
use crate::model::CompositionId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since a builder session is
/// single-threaded, so the `StorageBackend` trait can take `&self`.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<HashMap<CompositionId, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Test helper to plant raw JSON, bypassing the record layer.
    pub fn insert_raw(&self, id: &CompositionId, json: &str) {
        self.records
            .borrow_mut()
            .insert(id.clone(), json.to_string());
    }

    fn check_writable(&self) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(PaypageError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn read_record(&self, id: &CompositionId) -> Result<Option<String>> {
        Ok(self.records.borrow().get(id).cloned())
    }

    fn write_record(&self, id: &CompositionId, json: &str) -> Result<()> {
        self.check_writable()?;
        self.records
            .borrow_mut()
            .insert(id.clone(), json.to_string());
        Ok(())
    }

    fn delete_record(&self, id: &CompositionId) -> Result<bool> {
        self.check_writable()?;
        Ok(self.records.borrow_mut().remove(id).is_some())
    }

    fn list_record_ids(&self) -> Result<Vec<CompositionId>> {
        Ok(self.records.borrow().keys().cloned().collect())
    }

    fn record_path(&self, id: &CompositionId) -> PathBuf {
        PathBuf::from(format!("memory://checkout-{}", id))
    }
}
