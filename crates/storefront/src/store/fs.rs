use super::catalog_store::CatalogStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

/// Production catalog store, persisted under a data directory.
pub type FileStore = CatalogStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        CatalogStore::with_backend(FsBackend::new(root))
    }
}
