use crate::commands::CmdResult;
use crate::query::{self, Query};
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, query: &Query) -> CmdResult {
    let products = store.load();
    let listed = query::run(&products, query);
    tracing::debug!(total = products.len(), listed = listed.len(), "catalog queried");
    CmdResult::default().with_listed_products(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::commands::create;
    use crate::model::{Category, ProductDraft};
    use crate::query::{ProductFilter, SortOrder, NEW_ARRIVALS_LIMIT};
    use crate::store::memory::InMemoryStore;

    fn add(
        store: &mut InMemoryStore,
        clock: &ManualClock,
        category: &str,
        price: f64,
        is_new: bool,
    ) {
        let draft = ProductDraft {
            name: format!("{} {}", category, price),
            category: category.into(),
            price,
            images: vec!["img".into()],
            is_new,
            ..ProductDraft::default()
        };
        create::run(store, clock, &draft).unwrap();
        clock.advance(100);
    }

    #[test]
    fn lists_from_persisted_catalog() {
        let mut store = InMemoryStore::new();
        let clock = ManualClock::at(100);
        add(&mut store, &clock, "silk", 500.0, true);
        add(&mut store, &clock, "cotton", 300.0, false);

        let silk = run(
            &store,
            &Query::new(ProductFilter::new().with_category(Category::Silk), SortOrder::Newest),
        );
        assert_eq!(silk.listed_products.len(), 1);
        assert_eq!(silk.listed_products[0].id, "100");

        let cheap_first = run(&store, &Query::new(ProductFilter::new(), SortOrder::PriceAsc));
        let ids: Vec<_> = cheap_first.listed_products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["200", "100"]);

        let arrivals = run(&store, &Query::new_arrivals(NEW_ARRIVALS_LIMIT));
        assert_eq!(arrivals.listed_products.len(), 1);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = InMemoryStore::new();
        assert!(run(&store, &Query::default()).listed_products.is_empty());
    }
}
