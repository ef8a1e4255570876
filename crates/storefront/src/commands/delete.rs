use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Permanently remove product `id`. Deleting an unknown id succeeds and
/// changes nothing.
pub fn run<S: DataStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let mut products = store.load();
    let mut result = CmdResult::default();

    if let Some(pos) = products.iter().position(|p| p.id == id) {
        let removed = products.remove(pos);
        store.save(&products)?;
        tracing::info!(%id, "product deleted");
        result.add_message(CmdMessage::success(format!(
            "Product deleted: {}",
            removed.name
        )));
        result.affected_products.push(removed);
    } else {
        result.add_message(CmdMessage::info(format!("No product with id {}", id)));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::commands::create;
    use crate::model::ProductDraft;
    use crate::store::memory::InMemoryStore;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: "cotton".into(),
            price: 300.0,
            images: vec!["img".into()],
            ..ProductDraft::default()
        }
    }

    fn seeded() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        let clock = ManualClock::at(100);
        for name in ["A", "B", "C"] {
            create::run(&mut store, &clock, &draft(name)).unwrap();
            clock.advance(100);
        }
        store
    }

    #[test]
    fn removes_matching_product() {
        let mut store = seeded();
        let result = run(&mut store, "200").unwrap();
        assert_eq!(result.affected_products[0].name, "B");

        let names: Vec<_> = store.load().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut once = seeded();
        run(&mut once, "100").unwrap();

        let mut twice = seeded();
        run(&mut twice, "100").unwrap();
        let second = run(&mut twice, "100").unwrap();

        assert!(second.affected_products.is_empty());
        assert_eq!(once.load(), twice.load());
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let mut store = seeded();
        let before = store.load();
        run(&mut store, "nope").unwrap();
        assert_eq!(store.load(), before);
    }
}
