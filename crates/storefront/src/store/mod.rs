//! # Storage Layer
//!
//! The shop keeps everything in a small set of named slots, each holding a
//! JSON value. The layer is split in two:
//!
//! 1. **Backend** ([`backend::StorageBackend`]): raw slot I/O. Knows nothing
//!    about products.
//! 2. **Catalog store** ([`catalog_store::CatalogStore`]): encodes the whole
//!    catalog into the `products` slot and decodes it back.
//!
//! ## Slots
//!
//! ```text
//! <data dir>/
//! ├── products.json     # JSON array of products
//! ├── adminData.json    # {"username": ..., "password": ...}
//! ├── adminToken.json   # base64 session marker, present only while logged in
//! └── config.json       # StorefrontConfig (not a slot, see config.rs)
//! ```
//!
//! ## Failure Model
//!
//! - Absent or malformed `products` → empty catalog. Never an error; the next
//!   successful save overwrites the bad value.
//! - Write failures are returned to the caller, who must not assume the write
//!   happened.
//! - No locking. Every mutation is load → transform → save of the full
//!   collection, so concurrent writers race and the last save wins.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production, one file per slot, atomic renames.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.

use crate::error::Result;
use crate::model::Product;

pub mod backend;
pub mod catalog_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// Abstract interface for catalog persistence.
///
/// Callers load, transform and save within one operation and never hold the
/// loaded collection beyond it.
pub trait DataStore {
    /// Read the full catalog. Unreadable data yields an empty collection.
    fn load(&self) -> Vec<Product>;

    /// Replace the full catalog.
    fn save(&mut self, products: &[Product]) -> Result<()>;
}
