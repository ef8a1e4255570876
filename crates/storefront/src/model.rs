use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Product families carried by the shop.
///
/// Stored lowercase (`"silk"`, `"cotton"`); parsing accepts any case so that
/// records and command-line input written as `Silk` still resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Silk,
    Cotton,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[Category::Silk, Category::Cotton]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Silk => "silk",
            Category::Cotton => "cotton",
        }
    }

    /// Heading used for category pages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Silk => "Silk Sarees",
            Category::Cotton => "Cotton Sarees",
        }
    }

    /// Type assigned to new records that don't name one.
    pub fn default_type(&self) -> &'static str {
        match self {
            Category::Silk => "Dola Silk",
            Category::Cotton => "Kalyani Cotton",
        }
    }

    /// Conventional sub-classifications offered by the type filter.
    pub fn known_types(&self) -> &'static [&'static str] {
        match self {
            Category::Silk => &["Dola Silk", "Binni Silk", "Banarasi Silk"],
            Category::Cotton => &["Kalyani Cotton", "Linen Cotton"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown category: {}", wanted))
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A catalog record as persisted in the `products` slot.
///
/// Field names on the wire keep the storage layout used by earlier versions of
/// the shop (`_id`, `isNew`, `type`), so existing data loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    /// Creation time in milliseconds since the epoch. This, not `id`, orders
    /// the catalog. Older records lack it and get it backfilled from `id`;
    /// their `createdAt` date string is not read.
    #[serde(rename = "createdAtMs", default)]
    pub created_at: i64,
    pub name: String,
    pub category: Category,
    #[serde(rename = "type", default)]
    pub product_type: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(rename = "isNew", default)]
    pub is_new: bool,
}

impl Product {
    /// Build a record from an already validated draft.
    pub fn from_draft(created_at: i64, category: Category, draft: &ProductDraft) -> Self {
        Self {
            id: created_at.to_string(),
            created_at,
            name: draft.name.trim().to_string(),
            category,
            product_type: draft.resolved_type(category),
            price: draft.price,
            description: draft.description.clone(),
            images: draft.images.clone(),
            is_new: draft.is_new,
        }
    }

    /// Replace every field except identity and creation time.
    pub fn apply_draft(&mut self, category: Category, draft: &ProductDraft) {
        let product_type = match draft.explicit_type() {
            Some(t) => t.to_string(),
            None if category == self.category && !self.product_type.is_empty() => {
                self.product_type.clone()
            }
            None => category.default_type().to_string(),
        };

        self.name = draft.name.trim().to_string();
        self.category = category;
        self.product_type = product_type;
        self.price = draft.price;
        self.description = draft.description.clone();
        self.images = draft.images.clone();
        self.is_new = draft.is_new;
    }

    /// Records written before `createdAtMs` existed carry their creation time
    /// only in the id. Non-numeric ids sort as oldest.
    pub fn backfill_created_at(&mut self) {
        if self.created_at == 0 {
            self.created_at = self.id.trim().parse::<i64>().unwrap_or(0);
        }
    }

    /// Concatenated text the catalog search runs against.
    pub fn search_haystack(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.name.to_lowercase(),
            self.description.to_lowercase(),
            self.product_type.to_lowercase()
        )
    }
}

/// Candidate product data coming from the admin form, before validation.
///
/// `category` stays a raw string so that validation can report an unknown
/// value instead of failing at parse time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub product_type: Option<String>,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub is_new: bool,
}

impl ProductDraft {
    pub fn explicit_type(&self) -> Option<&str> {
        self.product_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn resolved_type(&self, category: Category) -> String {
        self.explicit_type()
            .unwrap_or_else(|| category.default_type())
            .to_string()
    }

    /// Pre-fill a draft from an existing record, as the edit form does.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.to_string(),
            product_type: Some(product.product_type.clone()),
            price: product.price,
            description: product.description.clone(),
            images: product.images.clone(),
            is_new: product.is_new,
        }
    }
}
