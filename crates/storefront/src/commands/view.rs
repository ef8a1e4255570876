use crate::commands::CmdResult;
use crate::error::{Result, StoreError};
use crate::model::Product;
use crate::store::DataStore;

pub fn find<S: DataStore>(store: &S, id: &str) -> Result<Product> {
    store
        .load()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))
}

pub fn run<S: DataStore>(store: &S, id: &str) -> Result<CmdResult> {
    let product = find(store, id)?;
    Ok(CmdResult::default().with_listed_products(vec![product]))
}

/// Step through a product's image gallery, wrapping at both ends.
pub fn cycle_image(len: usize, current: usize, step: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let current = (current as isize).rem_euclid(len);
    (current + step).rem_euclid(len) as usize
}
