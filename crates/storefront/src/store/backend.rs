use crate::error::Result;

/// Slot holding the JSON array of products.
pub const PRODUCTS_SLOT: &str = "products";
/// Slot holding the admin credential pair.
pub const ADMIN_DATA_SLOT: &str = "adminData";
/// Slot holding the session marker written on login.
pub const ADMIN_TOKEN_SLOT: &str = "adminToken";

/// Abstract interface for raw key-value I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`CatalogStore`](super::catalog_store::CatalogStore) handles the "what"
/// (encoding the catalog, tolerating corrupt data).
///
/// Every method takes `&self`: backends are either stateless I/O or use
/// interior mutability.
pub trait StorageBackend {
    /// Read a slot. Returns Ok(None) when the slot has never been written.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Replace a slot's value.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a
    /// partial value.
    fn write_slot(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Removing an absent slot is not an error.
    fn remove_slot(&self, key: &str) -> Result<()>;
}
