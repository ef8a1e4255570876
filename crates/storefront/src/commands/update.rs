use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StoreError};
use crate::model::ProductDraft;
use crate::schema::validate;
use crate::store::DataStore;

/// Replace the fields of product `id` with the draft.
///
/// A missing `id` is not an error: the product may have been deleted since
/// the form was opened. The catalog is saved back unchanged.
pub fn run<S: DataStore>(store: &mut S, id: &str, draft: &ProductDraft) -> Result<CmdResult> {
    let category = validate(draft).map_err(StoreError::Validation)?;

    let mut products = store.load();
    let mut result = CmdResult::default();

    match products.iter_mut().find(|p| p.id == id) {
        Some(product) => {
            product.apply_draft(category, draft);
            result.affected_products.push(product.clone());
            result.add_message(CmdMessage::success(format!(
                "Product updated: {}",
                product.name
            )));
        }
        None => {
            tracing::info!(%id, "update target vanished, saving catalog unchanged");
            result.add_message(CmdMessage::warning(format!(
                "Product {} no longer exists, nothing to update",
                id
            )));
        }
    }

    store.save(&products)?;
    Ok(result)
}
