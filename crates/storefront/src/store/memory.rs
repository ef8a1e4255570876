use super::catalog_store::CatalogStore;
use super::mem_backend::MemBackend;

/// In-memory catalog store for testing.
pub type InMemoryStore = CatalogStore<MemBackend>;

impl InMemoryStore {
    pub fn new() -> Self {
        CatalogStore::with_backend(MemBackend::new())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
