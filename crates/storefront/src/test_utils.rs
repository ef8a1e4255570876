use crate::model::{Category, Product, ProductDraft};
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// A second store over the same directory, standing in for another process.
    pub fn second_writer(&self) -> FileStore {
        FileStore::new(self.root.clone())
    }
}

pub fn sample_product(created_at: i64, name: &str, category: Category, price: f64) -> Product {
    let draft = ProductDraft {
        name: name.to_string(),
        category: category.to_string(),
        price,
        images: vec![format!("https://img.example/{}.jpg", created_at)],
        ..ProductDraft::default()
    };
    Product::from_draft(created_at, category, &draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::commands::{create, delete};
    use crate::store::DataStore;

    #[test]
    fn file_store_round_trip_keeps_order() {
        let mut env = TestEnv::new();
        let products = vec![
            sample_product(3, "Gamma", Category::Cotton, 250.0),
            sample_product(1, "Alpha", Category::Silk, 700.0),
            sample_product(2, "Beta", Category::Silk, 50.5),
        ];

        env.store.save(&products).unwrap();
        assert_eq!(env.store.load(), products);
        assert!(env.root.join("products.json").exists());
    }

    #[test]
    fn interleaved_writers_lose_the_earlier_write() {
        let mut env = TestEnv::new();
        let mut other = env.second_writer();
        let clock = ManualClock::at(100);

        let draft = ProductDraft {
            name: "Seed".into(),
            category: "silk".into(),
            images: vec!["i".into()],
            ..ProductDraft::default()
        };
        create::run(&mut env.store, &clock, &draft).unwrap();

        // Writer B reads before writer A's delete lands, then saves its stale copy.
        let mut stale = other.load();
        delete::run(&mut env.store, "100").unwrap();
        assert!(env.store.load().is_empty());

        stale.push(sample_product(200, "From B", Category::Cotton, 10.0));
        other.save(&stale).unwrap();

        let ids: Vec<_> = env.store.load().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["100", "200"]);
    }
}
