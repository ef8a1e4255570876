use super::backend::{StorageBackend, PRODUCTS_SLOT};
use super::DataStore;
use crate::error::{Result, StoreError};
use crate::model::Product;
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;

/// The persistence adapter: the only component that reads or writes the
/// `products` slot.
///
/// The whole catalog travels as one JSON array. There is no locking; two
/// stores over the same backend can interleave load/save cycles and the last
/// save wins.
///
/// Array elements that do not decode as a [`Product`] are kept aside at load
/// and appended unchanged on the next save.
pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    undecoded: RefCell<Vec<Value>>,
}

impl<B: StorageBackend> CatalogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            undecoded: RefCell::new(Vec::new()),
        }
    }

    /// Raw slot access, used by the session guard which keeps its own slots.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> DataStore for CatalogStore<B> {
    fn load(&self) -> Vec<Product> {
        let raw = match self.backend.read_slot(PRODUCTS_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "catalog slot unreadable, treating as empty");
                return Vec::new();
            }
        };

        let records = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "catalog slot malformed, treating as empty");
                self.undecoded.borrow_mut().clear();
                return Vec::new();
            }
        };

        let mut products = Vec::with_capacity(records.len());
        let mut undecoded = Vec::new();
        for record in records {
            match Product::deserialize(&record) {
                Ok(mut product) => {
                    product.backfill_created_at();
                    products.push(product);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        id = %record.get("_id").unwrap_or(&serde_json::Value::Null),
                        "skipping catalog record that does not decode"
                    );
                    undecoded.push(record);
                }
            }
        }

        tracing::debug!(
            count = products.len(),
            skipped = undecoded.len(),
            "catalog loaded"
        );
        *self.undecoded.borrow_mut() = undecoded;
        products
    }

    fn save(&mut self, products: &[Product]) -> Result<()> {
        let mut records = products
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Serialization)?;
        records.extend(self.undecoded.borrow().iter().cloned());

        let content = serde_json::to_string(&records).map_err(StoreError::Serialization)?;
        self.backend.write_slot(PRODUCTS_SLOT, &content)?;
        tracing::debug!(count = records.len(), "catalog saved");
        Ok(())
    }
}
