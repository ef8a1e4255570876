//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every storefront operation, whatever UI drives it.
//!
//! It owns the one [`CatalogStore`] instance; commands borrow it for a single
//! load/save cycle and nothing keeps a copy of the catalog between calls.
//!
//! ## Gating
//!
//! Browsing (`list_products`, `view_product`, ...) is open. Catalog mutations
//! and the admin listing require an active admin session and fail with
//! [`StoreError::Unauthorized`] otherwise.
//!
//! ## Session notifications
//!
//! `login` and `logout` notify subscribers registered through
//! [`StorefrontApi::subscribe`], so UI pieces can react without polling.

use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};
use crate::model::{Category, ProductDraft};
use crate::query::{ProductFilter, Query};
use crate::session::{self, SessionClaims, SessionEvent, SessionEvents};
use crate::store::backend::StorageBackend;
use crate::store::catalog_store::CatalogStore;
use crate::upload::{self, ImageHost};
use std::path::PathBuf;

pub struct StorefrontApi<B: StorageBackend, C: Clock = SystemClock> {
    store: CatalogStore<B>,
    clock: C,
    config: StorefrontConfig,
    events: SessionEvents,
}

impl<B: StorageBackend> StorefrontApi<B, SystemClock> {
    pub fn new(backend: B, config: StorefrontConfig) -> Self {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<B: StorageBackend, C: Clock> StorefrontApi<B, C> {
    pub fn with_clock(backend: B, config: StorefrontConfig, clock: C) -> Self {
        Self {
            store: CatalogStore::with_backend(backend),
            clock,
            config,
            events: SessionEvents::new(),
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&SessionEvent) + 'static,
    {
        self.events.subscribe(subscriber);
    }

    /// Filter with the configured price ceiling and nothing else.
    pub fn default_filter(&self) -> ProductFilter {
        ProductFilter::new().with_price_range(0.0, self.config.price_ceiling)
    }

    // --- Browsing ---

    pub fn list_products(&self, query: &Query) -> CmdResult {
        commands::list::run(&self.store, query)
    }

    pub fn category_products(&self, category: Category) -> CmdResult {
        commands::list::run(&self.store, &Query::category_page(category))
    }

    pub fn new_arrivals(&self) -> CmdResult {
        let query = Query::new_arrivals(self.config.new_arrivals_limit);
        commands::list::run(&self.store, &query)
    }

    pub fn view_product(&self, id: &str) -> Result<CmdResult> {
        commands::view::run(&self.store, id)
    }

    pub fn order_product(&self, id: &str) -> Result<CmdResult> {
        commands::order::run(&self.store, id, &self.config.order_phone)
    }

    // --- Session ---

    pub fn login(&mut self, username: &str, password: &str) -> Result<CmdResult> {
        session::login(self.store.backend(), username, password)?;
        self.events.notify(&SessionEvent::LoggedIn {
            username: username.to_string(),
        });

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Logged in successfully"));
        Ok(result)
    }

    pub fn logout(&mut self) -> Result<CmdResult> {
        let was_logged_in = self.is_admin();
        session::logout(self.store.backend())?;

        let mut result = CmdResult::default();
        if was_logged_in {
            self.events.notify(&SessionEvent::LoggedOut);
            result.add_message(CmdMessage::success("Logged out successfully"));
        } else {
            result.add_message(CmdMessage::info("Not logged in"));
        }
        Ok(result)
    }

    pub fn session(&self) -> Option<SessionClaims> {
        session::current_session(self.store.backend())
    }

    pub fn is_admin(&self) -> bool {
        session::is_authenticated(self.store.backend())
    }

    fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(StoreError::Unauthorized)
        }
    }

    // --- Admin ---

    pub fn admin_products(&self, search: &str) -> Result<CmdResult> {
        self.require_admin()?;
        Ok(commands::list::run(&self.store, &Query::admin_search(search)))
    }

    pub fn create_product(&mut self, draft: &ProductDraft) -> Result<CmdResult> {
        self.require_admin()?;
        commands::create::run(&mut self.store, &self.clock, draft)
    }

    pub fn update_product(&mut self, id: &str, draft: &ProductDraft) -> Result<CmdResult> {
        self.require_admin()?;
        commands::update::run(&mut self.store, id, draft)
    }

    pub fn delete_product(&mut self, id: &str) -> Result<CmdResult> {
        self.require_admin()?;
        commands::delete::run(&mut self.store, id)
    }

    /// Upload `files`, append their URIs to the draft's images, then create.
    /// A failed upload aborts before anything is written.
    pub fn create_product_with_uploads<H: ImageHost + ?Sized>(
        &mut self,
        host: &H,
        mut draft: ProductDraft,
        files: &[PathBuf],
    ) -> Result<CmdResult> {
        self.require_admin()?;
        draft.images.extend(upload::upload_all(host, files)?);
        self.create_product(&draft)
    }

    /// Upload `files`, append their URIs to the draft's images, then update.
    pub fn update_product_with_uploads<H: ImageHost + ?Sized>(
        &mut self,
        host: &H,
        id: &str,
        mut draft: ProductDraft,
        files: &[PathBuf],
    ) -> Result<CmdResult> {
        self.require_admin()?;
        draft.images.extend(upload::upload_all(host, files)?);
        self.update_product(id, &draft)
    }
}

pub use crate::commands::order::OrderLink;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::query::SortOrder;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::mem_backend::MemBackend;
    use crate::store::DataStore;
    use crate::upload::fake::FakeHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn api() -> StorefrontApi<MemBackend, ManualClock> {
        StorefrontApi::with_clock(
            MemBackend::new(),
            StorefrontConfig::default(),
            ManualClock::at(1_000),
        )
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: "silk".into(),
            price: 800.0,
            images: vec!["https://img/1.jpg".into()],
            is_new: true,
            ..ProductDraft::default()
        }
    }

    #[test]
    fn mutations_require_admin_session() {
        let mut api = api();
        assert!(matches!(
            api.create_product(&draft("x")),
            Err(StoreError::Unauthorized)
        ));
        assert!(matches!(
            api.delete_product("1"),
            Err(StoreError::Unauthorized)
        ));
        assert!(matches!(
            api.admin_products(""),
            Err(StoreError::Unauthorized)
        ));
        assert!(api.store.load().is_empty());
    }

    #[test]
    fn admin_can_create_update_and_delete() {
        let mut api = api();
        api.login("rd", "abcd").unwrap();

        let created = api.create_product(&draft("Mint")).unwrap();
        let id = created.affected_products[0].id.clone();
        assert_eq!(id, "1000");

        let mut edit = draft("Mint Green");
        edit.price = 950.0;
        api.update_product(&id, &edit).unwrap();
        assert_eq!(api.view_product(&id).unwrap().listed_products[0].price, 950.0);

        api.delete_product(&id).unwrap();
        assert!(api.list_products(&Query::default()).listed_products.is_empty());
    }

    #[test]
    fn browsing_is_open() {
        let mut api = api();
        api.login("rd", "abcd").unwrap();
        api.create_product(&draft("Open")).unwrap();
        api.logout().unwrap();

        assert_eq!(api.new_arrivals().listed_products.len(), 1);
        assert_eq!(api.category_products(Category::Silk).listed_products.len(), 1);
        assert!(api.category_products(Category::Cotton).listed_products.is_empty());
        let order = api.order_product("1000").unwrap().order.unwrap();
        assert!(order.url.starts_with("https://wa.me/918838286823?text="));
    }

    #[test]
    fn session_events_fire_once_per_transition() {
        let mut api = api();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        api.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        assert!(api.login("rd", "nope").is_err());
        api.login("rd", "abcd").unwrap();
        api.logout().unwrap();
        api.logout().unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionEvent::LoggedIn {
                    username: "rd".into()
                },
                SessionEvent::LoggedOut,
            ]
        );
    }

    #[test]
    fn failed_upload_blocks_create() {
        let mut api = api();
        api.login("rd", "abcd").unwrap();
        let host = FakeHost::default();

        let mut no_images = draft("Pending");
        no_images.images.clear();
        let err = api
            .create_product_with_uploads(&host, no_images.clone(), &[PathBuf::from("fail.png")])
            .unwrap_err();
        assert!(matches!(err, StoreError::Upload(_)));
        assert!(api.store.load().is_empty());

        let ok = api
            .create_product_with_uploads(&host, no_images, &[PathBuf::from("front.png")])
            .unwrap();
        assert_eq!(
            ok.affected_products[0].images,
            vec!["https://img.example/front.png".to_string()]
        );
    }

    #[test]
    fn failed_upload_blocks_update() {
        let mut api = api();
        api.login("rd", "abcd").unwrap();
        let id = api.create_product(&draft("Kept")).unwrap().affected_products[0]
            .id
            .clone();
        let before = api.store.load();

        let mut edit = draft("Renamed");
        edit.price = 1.0;
        let files = [PathBuf::from("fail.png")];
        let err = api
            .update_product_with_uploads(&FakeHost::default(), &id, edit, &files)
            .unwrap_err();

        assert!(matches!(err, StoreError::Upload(_)));
        assert_eq!(api.store.load(), before);
    }

    #[test]
    fn admin_listing_searches_newest_first() {
        let mut api = api();
        api.login("rd", "abcd").unwrap();
        api.create_product(&draft("Zari Red")).unwrap();
        api.clock.advance(10);
        api.create_product(&draft("Plain Blue")).unwrap();
        api.clock.advance(10);
        api.create_product(&draft("Zari Gold")).unwrap();

        let listed = api.admin_products("zari").unwrap().listed_products;
        let names: Vec<_> = listed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zari Gold", "Zari Red"]);
    }
}
