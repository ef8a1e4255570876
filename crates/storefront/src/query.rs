//! # Query Engine
//!
//! Pure functions deriving the displayed product list from the full catalog.
//! Nothing here touches storage or mutates its input: the same catalog and
//! [`Query`] always produce the same ordered result.
//!
//! A query is three steps:
//!
//! 1. **Filter**: every active predicate of [`ProductFilter`] must hold (AND).
//! 2. **Sort**: by [`SortOrder`]. Every order ends with the newest-first rule,
//!    so equal prices still come out in a deterministic order.
//! 3. **Limit**: optional truncation (new arrivals show the first four).
//!
//! Ordering uses `created_at`, never the string form of `id`.

use crate::model::{Category, Product};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Upper price bound used when the caller doesn't set one.
pub const DEFAULT_PRICE_CEILING: f64 = 10_000.0;

/// Number of products on the home page "new arrivals" strip.
pub const NEW_ARRIVALS_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-high",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Newest => newest_first(a, b),
            SortOrder::PriceAsc => a.price.total_cmp(&b.price).then_with(|| newest_first(a, b)),
            SortOrder::PriceDesc => b.price.total_cmp(&a.price).then_with(|| newest_first(a, b)),
        }
    }
}

fn newest_first(a: &Product, b: &Product) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "price-asc" | "price-low" => Ok(SortOrder::PriceAsc),
            "price-high" | "price-desc" => Ok(SortOrder::PriceDesc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Composable product predicates. Defaults match everything priced within
/// `0..=DEFAULT_PRICE_CEILING`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    /// Exact type match. Applied even without a category.
    pub product_type: Option<String>,
    pub price_min: f64,
    pub price_max: f64,
    /// Every term must appear (case-insensitively) in name, description or type.
    pub search_terms: Vec<String>,
    pub only_new: bool,
    /// Set by [`ProductFilter::and`] when two exact-match predicates disagree.
    contradictory: bool,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            product_type: None,
            price_min: 0.0,
            price_max: DEFAULT_PRICE_CEILING,
            search_terms: Vec::new(),
            only_new: false,
            contradictory: false,
        }
    }
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Blank text adds no predicate.
    pub fn with_search(mut self, text: impl AsRef<str>) -> Self {
        let term = text.as_ref().trim().to_lowercase();
        if !term.is_empty() {
            self.search_terms.push(term);
        }
        self
    }

    pub fn only_new(mut self) -> Self {
        self.only_new = true;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.contradictory {
            return false;
        }
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if let Some(product_type) = &self.product_type {
            if &product.product_type != product_type {
                return false;
            }
        }
        if product.price < self.price_min || product.price > self.price_max {
            return false;
        }
        if self.only_new && !product.is_new {
            return false;
        }
        if !self.search_terms.is_empty() {
            let haystack = product.search_haystack();
            if !self.search_terms.iter().all(|t| haystack.contains(t.as_str())) {
                return false;
            }
        }
        true
    }

    /// The conjunction of two filters: a product matches the result exactly
    /// when it matches both inputs.
    pub fn and(&self, other: &ProductFilter) -> ProductFilter {
        let mut contradictory = self.contradictory || other.contradictory;

        let category = match (self.category, other.category) {
            (Some(a), Some(b)) if a != b => {
                contradictory = true;
                Some(a)
            }
            (a, b) => a.or(b),
        };

        let product_type = match (&self.product_type, &other.product_type) {
            (Some(a), Some(b)) if a != b => {
                contradictory = true;
                Some(a.clone())
            }
            (a, b) => a.clone().or_else(|| b.clone()),
        };

        let mut search_terms = self.search_terms.clone();
        for term in &other.search_terms {
            if !search_terms.contains(term) {
                search_terms.push(term.clone());
            }
        }

        ProductFilter {
            category,
            product_type,
            price_min: self.price_min.max(other.price_min),
            price_max: self.price_max.min(other.price_max),
            search_terms,
            only_new: self.only_new || other.only_new,
            contradictory,
        }
    }

    /// Number of user-visible narrowing choices in effect, the badge count on
    /// the filter button. `price_ceiling` is the configured default maximum.
    pub fn active_count(&self, price_ceiling: f64) -> usize {
        [
            self.category.is_some(),
            self.product_type.is_some(),
            self.price_min > 0.0,
            self.price_max < price_ceiling,
            !self.search_terms.is_empty(),
            self.only_new,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_active(&self, price_ceiling: f64) -> bool {
        self.active_count(price_ceiling) > 0
    }
}

/// Filter, order and limit: everything a listing needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub filter: ProductFilter,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(filter: ProductFilter, sort: SortOrder) -> Self {
        Self {
            filter,
            sort,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Category page: the category and nothing else. No price bounds either,
    /// so expensive pieces still show up.
    pub fn category_page(category: Category) -> Self {
        Self::new(
            ProductFilter::new()
                .with_category(category)
                .with_price_range(0.0, f64::INFINITY),
            SortOrder::Newest,
        )
    }

    /// Home page strip: newest products flagged as new.
    pub fn new_arrivals(limit: usize) -> Self {
        Self::new(
            ProductFilter::new()
                .only_new()
                .with_price_range(0.0, f64::INFINITY),
            SortOrder::Newest,
        )
        .with_limit(limit)
    }

    /// Admin dashboard: free-text search across the whole catalog, newest first.
    pub fn admin_search(text: &str) -> Self {
        Self::new(
            ProductFilter::new()
                .with_search(text)
                .with_price_range(f64::NEG_INFINITY, f64::INFINITY),
            SortOrder::Newest,
        )
    }

    /// Filter count including a non-default sort, as shown next to the
    /// "Clear Filters" action.
    pub fn active_count(&self, price_ceiling: f64) -> usize {
        self.filter.active_count(price_ceiling) + usize::from(self.sort != SortOrder::Newest)
    }
}

/// Run a query over the full catalog.
pub fn run(products: &[Product], query: &Query) -> Vec<Product> {
    let mut selected: Vec<Product> = products
        .iter()
        .filter(|p| query.filter.matches(p))
        .cloned()
        .collect();

    selected.sort_by(|a, b| query.sort.compare(a, b));

    if let Some(limit) = query.limit {
        selected.truncate(limit);
    }
    selected
}
