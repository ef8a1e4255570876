//! # Record Schema
//!
//! Validation rules for product drafts, and conversion of raw form input into
//! drafts. A draft that passes [`validate`] can always be turned into a
//! [`Product`](crate::model::Product).
//!
//! Rules, checked together so the admin sees every problem at once:
//! - `name` is non-empty after trimming
//! - `category` is one of the known [`Category`] values
//! - `price` is a finite, non-negative number
//! - `images` holds at least one entry
//!
//! `type` is deliberately not checked against [`Category::known_types`]: the
//! lists are a UI convention, not a constraint.

use crate::model::{Category, ProductDraft};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    EmptyName,
    UnknownCategory(String),
    NegativePrice,
    InvalidPrice(String),
    NoImages,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyName => write!(f, "Name cannot be empty"),
            Violation::UnknownCategory(c) => write!(f, "Unknown category: {}", c),
            Violation::NegativePrice => write!(f, "Price cannot be negative"),
            Violation::InvalidPrice(p) => write!(f, "Price is not a number: {}", p),
            Violation::NoImages => write!(f, "Please upload at least one image"),
        }
    }
}

/// Check a draft, returning its parsed category on success.
pub fn validate(draft: &ProductDraft) -> Result<Category, Vec<Violation>> {
    let mut violations = Vec::new();

    if draft.name.trim().is_empty() {
        violations.push(Violation::EmptyName);
    }

    let category = draft.category.parse::<Category>().ok();
    if category.is_none() {
        violations.push(Violation::UnknownCategory(draft.category.clone()));
    }

    if !draft.price.is_finite() {
        violations.push(Violation::InvalidPrice(draft.price.to_string()));
    } else if draft.price < 0.0 {
        violations.push(Violation::NegativePrice);
    }

    if draft.images.is_empty() {
        violations.push(Violation::NoImages);
    }

    match category {
        Some(c) if violations.is_empty() => Ok(c),
        _ => Err(violations),
    }
}

/// Raw admin form values, all text, as typed.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub product_type: Option<String>,
    pub price: String,
    pub description: String,
    pub images: Vec<String>,
    pub is_new: bool,
}

impl ProductForm {
    /// Normalize form input into a draft.
    ///
    /// Blank image entries are dropped. An unparseable price is reported as a
    /// violation here, since there is no number to hand to [`validate`].
    pub fn into_draft(self) -> Result<ProductDraft, Vec<Violation>> {
        let price_text = self.price.trim();
        let price = if price_text.is_empty() {
            0.0
        } else {
            price_text
                .parse::<f64>()
                .map_err(|_| vec![Violation::InvalidPrice(price_text.to_string())])?
        };

        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_lowercase(),
            product_type: self
                .product_type
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            price,
            description: self.description.trim().to_string(),
            images: self
                .images
                .into_iter()
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty())
                .collect(),
            is_new: self.is_new,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProductDraft {
        ProductDraft {
            name: "Kanchi".into(),
            category: "silk".into(),
            product_type: None,
            price: 0.0,
            description: String::new(),
            images: vec!["https://img/k.jpg".into()],
            is_new: false,
        }
    }

    #[test]
    fn accepts_valid_draft_with_zero_price() {
        assert_eq!(validate(&valid()), Ok(Category::Silk));
    }

    #[test]
    fn collects_all_violations() {
        let draft = ProductDraft {
            name: "   ".into(),
            category: "wool".into(),
            price: -1.0,
            images: vec![],
            ..valid()
        };
        let violations = validate(&draft).unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::EmptyName,
                Violation::UnknownCategory("wool".into()),
                Violation::NegativePrice,
                Violation::NoImages,
            ]
        );
    }

    #[test]
    fn rejects_nan_price() {
        let draft = ProductDraft {
            price: f64::NAN,
            ..valid()
        };
        assert!(matches!(
            validate(&draft).unwrap_err().as_slice(),
            [Violation::InvalidPrice(_)]
        ));
    }

    #[test]
    fn form_drops_blank_images_and_parses_price() {
        let form = ProductForm {
            name: " Cotton Blue ".into(),
            category: "Cotton".into(),
            product_type: Some("  ".into()),
            price: " 450.50 ".into(),
            description: "x".into(),
            images: vec!["".into(), "https://img/b.jpg".into(), "  ".into()],
            is_new: true,
        };
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.name, "Cotton Blue");
        assert_eq!(draft.category, "cotton");
        assert_eq!(draft.product_type, None);
        assert_eq!(draft.price, 450.5);
        assert_eq!(draft.images, vec!["https://img/b.jpg".to_string()]);
    }

    #[test]
    fn form_reports_unparseable_price() {
        let form = ProductForm {
            price: "12abc".into(),
            ..ProductForm::default()
        };
        assert_eq!(
            form.into_draft().unwrap_err(),
            vec![Violation::InvalidPrice("12abc".into())]
        );
    }
}
