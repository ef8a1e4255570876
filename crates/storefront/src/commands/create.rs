use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StoreError};
use crate::model::{Product, ProductDraft};
use crate::schema::validate;
use crate::store::DataStore;

pub fn run<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    draft: &ProductDraft,
) -> Result<CmdResult> {
    let category = validate(draft).map_err(StoreError::Validation)?;

    let mut products = store.load();

    // The clock alone can repeat or step back; ids must keep increasing.
    let newest = products.iter().map(|p| p.created_at).max();
    let created_at = match newest {
        Some(newest) => {
            let next = newest.checked_add(1).ok_or_else(|| {
                StoreError::Storage(format!("No id left after {}", newest))
            })?;
            clock.now_millis().max(next)
        }
        None => clock.now_millis(),
    };

    let product = Product::from_draft(created_at, category, draft);
    products.push(product.clone());
    store.save(&products)?;

    tracing::info!(id = %product.id, name = %product.name, "product created");

    let mut result = CmdResult::default().with_affected_products(vec![product.clone()]);
    result.add_message(CmdMessage::success(format!(
        "Product added: {} ({})",
        product.name, product.id
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::schema::Violation;
    use crate::store::backend::PRODUCTS_SLOT;
    use crate::store::memory::InMemoryStore;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: "silk".into(),
            product_type: None,
            price: 1200.0,
            description: "Pure silk".into(),
            images: vec!["https://img/1.jpg".into()],
            is_new: true,
        }
    }

    #[test]
    fn assigns_timestamp_id_and_default_type() {
        let mut store = InMemoryStore::new();
        let clock = ManualClock::at(1_700_000_000_000);

        let result = run(&mut store, &clock, &draft("Red Dola")).unwrap();
        let created = &result.affected_products[0];
        assert_eq!(created.id, "1700000000000");
        assert_eq!(created.product_type, "Dola Silk");

        let stored = store.load();
        assert_eq!(stored.len(), 1);
        assert_eq!(&stored[0], created);
    }

    #[test]
    fn ids_increase_in_creation_order() {
        let mut store = InMemoryStore::new();
        let clock = ManualClock::at(5_000);

        let first = run(&mut store, &clock, &draft("One")).unwrap();
        clock.advance(3);
        let second = run(&mut store, &clock, &draft("Two")).unwrap();

        let a = first.affected_products[0].id.parse::<i64>().unwrap();
        let b = second.affected_products[0].id.parse::<i64>().unwrap();
        assert!(b > a);
    }

    #[test]
    fn ids_stay_monotonic_when_clock_stalls_or_rewinds() {
        let mut store = InMemoryStore::new();
        let clock = ManualClock::at(9_000);

        run(&mut store, &clock, &draft("One")).unwrap();
        let stalled = run(&mut store, &clock, &draft("Two")).unwrap();
        assert_eq!(stalled.affected_products[0].created_at, 9_001);

        clock.set(100);
        let rewound = run(&mut store, &clock, &draft("Three")).unwrap();
        assert_eq!(rewound.affected_products[0].id, "9002");

        let mut ids: Vec<_> = store.load().into_iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn exhausted_id_space_is_an_error_not_a_panic() {
        let mut store = InMemoryStore::new();
        store.backend().put_raw(
            PRODUCTS_SLOT,
            r#"[{"_id":"x","createdAtMs":9223372036854775807,"name":"Last","category":"silk","price":1,"images":["i"]}]"#,
        );
        let before = store.load();
        assert_eq!(before[0].created_at, i64::MAX);

        let err = run(&mut store, &ManualClock::at(1), &draft("After")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(store.load(), before);
    }

    #[test]
    fn create_keeps_records_from_older_layouts() {
        let mut store = InMemoryStore::new();
        store.backend().put_raw(
            PRODUCTS_SLOT,
            r#"[{"_id":"1710000000000","name":"Plain","category":"silk","type":"Dola Silk","price":1200,"description":"","images":["a"],"isNew":false},
                {"_id":"1710000000500","name":"Dated","category":"cotton","price":400,"images":["b"],"createdAt":"2024-03-10T10:00:00.000Z","stock":2}]"#,
        );
        assert_eq!(store.load().len(), 2);

        run(&mut store, &ManualClock::at(1_720_000_000_000), &draft("New")).unwrap();

        let names: Vec<_> = store.load().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Plain", "Dated", "New"]);
    }

    #[test]
    fn keeps_explicit_type() {
        let mut store = InMemoryStore::new();
        let mut d = draft("Banarasi");
        d.product_type = Some("Banarasi Silk".into());
        run(&mut store, &ManualClock::at(1), &d).unwrap();
        assert_eq!(store.load()[0].product_type, "Banarasi Silk");
    }

    #[test]
    fn zero_images_is_a_no_op_with_validation_error() {
        let mut store = InMemoryStore::new();
        let clock = ManualClock::at(1);
        run(&mut store, &clock, &draft("Existing")).unwrap();
        let before = store.load();

        let mut bad = draft("No pictures");
        bad.images.clear();
        clock.advance(10);
        let err = run(&mut store, &clock, &bad).unwrap_err();

        assert_eq!(err.violations(), &[Violation::NoImages]);
        assert_eq!(store.load(), before);
    }

    #[test]
    fn storage_failure_is_reported() {
        let mut store = InMemoryStore::new();
        store.backend().set_simulate_write_error(true);

        let err = run(&mut store, &ManualClock::at(1), &draft("Lost")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));

        store.backend().set_simulate_write_error(false);
        assert!(store.load().is_empty());
    }
}
